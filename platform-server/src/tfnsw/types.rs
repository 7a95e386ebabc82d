//! TfNSW Trip Planner API response DTOs.
//!
//! These types map directly to the rapidJSON responses of the `/trip` and
//! `/stop_finder` endpoints. They use `Option` liberally because the API
//! omits fields freely, and the normalizer is expected to cope with any
//! subset being absent.

use serde::Deserialize;

/// Response from the `/trip` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    /// Candidate journeys from origin to destination.
    pub journeys: Option<Vec<Journey>>,
}

/// One journey: an ordered sequence of legs plus an interchange count.
///
/// Legs are trusted to be temporally and spatially contiguous
/// (leg[i].destination ≈ leg[i+1].origin); the pipeline does not verify
/// this.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    /// The legs of this journey, in travel order.
    pub legs: Option<Vec<Leg>>,

    /// Number of vehicle changes, as reported upstream.
    pub interchanges: Option<u32>,
}

impl Journey {
    /// The leg sequence, empty if absent.
    pub fn legs(&self) -> &[Leg] {
        self.legs.as_deref().unwrap_or(&[])
    }
}

/// One continuous segment of a journey on a single transport mode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Line/service descriptor for this leg.
    pub transportation: Option<Transportation>,

    /// Where this leg starts.
    pub origin: Option<Location>,

    /// Where this leg ends.
    pub destination: Option<Location>,

    /// Stops this leg calls at, including the boarding stop.
    pub stop_sequence: Option<Vec<StopSequenceEntry>>,

    /// Realtime monitoring status. The API sends either a single string or
    /// a list of status strings depending on schema version.
    pub realtime_status: Option<RealtimeStatus>,
}

impl Leg {
    /// The numeric product class of this leg, if present.
    pub fn class_code(&self) -> Option<i64> {
        self.transportation
            .as_ref()?
            .product
            .as_ref()?
            .class
    }

    /// Whether this leg is tracked by the realtime feed.
    pub fn is_monitored(&self) -> bool {
        self.realtime_status
            .as_ref()
            .is_some_and(RealtimeStatus::is_monitored)
    }
}

/// Realtime status, which upstream renders as a string or a string list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RealtimeStatus {
    One(String),
    Many(Vec<String>),
}

impl RealtimeStatus {
    /// True if any status entry mentions `MONITORED`.
    pub fn is_monitored(&self) -> bool {
        match self {
            RealtimeStatus::One(s) => s.contains("MONITORED"),
            RealtimeStatus::Many(v) => v.iter().any(|s| s.contains("MONITORED")),
        }
    }
}

/// Line/service descriptor attached to a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    /// Full line name (e.g. "Sydney Trains Network T1").
    pub name: Option<String>,

    /// Short line name (e.g. "T1").
    pub disassembled_name: Option<String>,

    /// Line number.
    pub number: Option<String>,

    /// Where the vehicle itself terminates (not the rider's destination).
    pub destination: Option<TransportationDestination>,

    /// Product descriptor carrying the transport-mode class code.
    pub product: Option<Product>,
}

/// Terminus of the vehicle serving a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDestination {
    pub name: Option<String>,
}

/// Product descriptor with the numeric transport-mode class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Transport-mode class code (1 train, 2 metro, 99/100 walk, ...).
    pub class: Option<i64>,
}

/// A stop location on a leg (origin, destination, or stop sequence entry).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Global stop id.
    pub id: Option<String>,

    /// Full location name (e.g. "Wynyard Station, Platform 3, Sydney").
    pub name: Option<String>,

    /// Short location name (e.g. "Wynyard").
    pub disassembled_name: Option<String>,

    /// Timetabled departure instant (ISO 8601).
    pub departure_time_planned: Option<String>,

    /// Realtime departure estimate (ISO 8601).
    pub departure_time_estimated: Option<String>,

    /// Timetabled arrival instant (ISO 8601).
    pub arrival_time_planned: Option<String>,

    /// Realtime arrival estimate (ISO 8601).
    pub arrival_time_estimated: Option<String>,

    /// Extra properties, including platform naming.
    pub properties: Option<LocationProperties>,
}

impl Location {
    /// Platform name, preferring the live field over the planned stopping point.
    pub fn platform(&self) -> Option<&str> {
        let props = self.properties.as_ref()?;
        props
            .platform_name
            .as_deref()
            .or(props.stopping_point_planned.as_deref())
    }
}

/// Platform-related properties of a location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProperties {
    /// Live platform name (e.g. "Platform 3").
    pub platform_name: Option<String>,

    /// Planned stopping point, used as a fallback when no live platform.
    pub stopping_point_planned: Option<String>,
}

/// A stop within a leg's stop sequence.
///
/// Only its presence matters to the stop counter, but the names are kept
/// for debugging dumps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSequenceEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub disassembled_name: Option<String>,
}

/// Response from the `/stop_finder` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopFinderResponse {
    /// Matched locations of any kind (stops, POIs, addresses).
    pub locations: Option<Vec<StopLocation>>,
}

/// A location returned by the stop finder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub disassembled_name: Option<String>,

    /// Location kind; only `"stop"` entries are offered to the user.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl StopLocation {
    /// Whether this location is an actual public transport stop.
    pub fn is_stop(&self) -> bool {
        self.kind.as_deref() == Some("stop")
    }
}
