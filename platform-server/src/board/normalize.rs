//! Journey normalizer and departure list builder.
//!
//! One `Departure` per accepted journey. Journeys with no legs or no rail
//! leg are rejected silently; missing fields degrade to placeholders so a
//! partial upstream record still renders as a row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tfnsw::types::{Journey, Leg, Location};

use super::PLACEHOLDER;
use super::classify::classify;
use super::stops::{InterchangeDetail, count_rail_stops, interchange_details};
use super::timing::{
    catchable, delay_minutes, local_hhmm, minutes_between, parse_instant, resolve_raw,
};

/// One row of the departure board.
///
/// Created fresh per request, never mutated after construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Short line name of the boarding service (e.g. "T1").
    pub line: String,

    /// Line number, empty when unknown.
    pub line_number: String,

    /// Where the boarded train terminates (not the rider's destination).
    pub train_destination: String,

    /// Station the rider boards at, when the journey starts with a walk.
    pub boarding_station: String,

    /// Raw upstream departure timestamp (estimate preferred).
    pub departure_time: Option<String>,

    /// Raw upstream arrival timestamp (estimate preferred).
    pub arrival_time: Option<String>,

    /// Departure rendered as `HH:MM` Sydney time.
    pub departure_time_local: String,

    /// Arrival rendered as `HH:MM` Sydney time.
    pub arrival_time_local: String,

    /// Whole minutes until departure, relative to the request's "now".
    pub minutes_until_departure: Option<i64>,

    /// Whole minutes from departure to arrival.
    pub duration_minutes: Option<i64>,

    /// Boarding platform.
    pub platform: String,

    /// Platform at the journey's final destination.
    pub arrival_platform: String,

    /// Delay of the boarding leg in minutes; negative means early.
    pub delay_minutes: i64,

    /// Whether the boarding leg is tracked by the realtime feed.
    pub is_realtime: bool,

    /// Vehicle changes, verbatim from the journey object.
    pub interchanges: u32,

    /// Per-change line/station/platform details.
    pub interchange_details: Vec<InterchangeDetail>,

    /// Rail stops traversed across the whole journey.
    pub number_of_stops: u32,

    /// UI hint: departure is more than five minutes away.
    pub catchable: bool,

    /// Resolved departure instant, kept for sorting only.
    #[serde(skip)]
    departure_instant: Option<DateTime<Utc>>,
}

fn text_or<'a>(value: Option<&'a str>, default: &'a str) -> String {
    value.unwrap_or(default).to_string()
}

/// Normalize a single journey into a departure record.
///
/// Returns `None` for journeys with no legs or no rail leg. `now` is the
/// single instant captured for the whole request; passing the same journey
/// and `now` twice yields identical records.
pub fn normalize_journey(journey: &Journey, now: DateTime<Utc>) -> Option<Departure> {
    let legs = journey.legs();
    let (first, last) = (legs.first()?, legs.last()?);

    // Boarding leg: the first rail leg. No rail leg, no row.
    let boarding: &Leg = legs
        .iter()
        .find(|leg| classify(leg.class_code()).is_rail())?;

    // Departure facts come from the journey's very first leg (possibly a
    // walk), so the countdown says "leave now", not "train leaves".
    let journey_origin = first.origin.as_ref();
    let journey_dest = last.destination.as_ref();

    let departure_time = journey_origin.and_then(|o| {
        resolve_raw(
            o.departure_time_planned.as_deref(),
            o.departure_time_estimated.as_deref(),
        )
    });
    let arrival_time = journey_dest.and_then(|d| {
        resolve_raw(
            d.arrival_time_planned.as_deref(),
            d.arrival_time_estimated.as_deref(),
        )
    });

    let departure_instant = parse_instant(departure_time);
    let arrival_instant = parse_instant(arrival_time);

    let minutes_until_departure = departure_instant.map(|dep| minutes_between(dep, now));
    let duration_minutes = match (departure_instant, arrival_instant) {
        (Some(dep), Some(arr)) => Some(minutes_between(arr, dep)),
        _ => None,
    };

    let boarding_origin = boarding.origin.as_ref();
    let transport = boarding.transportation.as_ref();

    Some(Departure {
        line: text_or(
            transport.and_then(|t| t.disassembled_name.as_deref()),
            PLACEHOLDER,
        ),
        line_number: text_or(transport.and_then(|t| t.number.as_deref()), ""),
        train_destination: text_or(
            transport
                .and_then(|t| t.destination.as_ref())
                .and_then(|d| d.name.as_deref()),
            "",
        ),
        boarding_station: text_or(
            boarding_origin.and_then(|o| o.disassembled_name.as_deref()),
            "",
        ),
        departure_time: departure_time.map(String::from),
        arrival_time: arrival_time.map(String::from),
        departure_time_local: local_hhmm(departure_instant),
        arrival_time_local: local_hhmm(arrival_instant),
        minutes_until_departure,
        duration_minutes,
        platform: text_or(boarding_origin.and_then(Location::platform), PLACEHOLDER),
        arrival_platform: text_or(journey_dest.and_then(Location::platform), PLACEHOLDER),
        delay_minutes: boarding_origin.map_or(0, delay_minutes),
        is_realtime: boarding.is_monitored(),
        interchanges: journey.interchanges.unwrap_or(0),
        interchange_details: interchange_details(journey),
        number_of_stops: count_rail_stops(legs),
        catchable: catchable(minutes_until_departure),
        departure_instant,
    })
}

/// Build the full board: normalize every journey, drop rejections, and
/// sort ascending by departure instant.
///
/// The sort is stable and undated rows sink to the end; duplicate journeys
/// from upstream are kept as separate rows.
pub fn build_board(journeys: &[Journey], now: DateTime<Utc>) -> Vec<Departure> {
    let mut board: Vec<Departure> = journeys
        .iter()
        .filter_map(|journey| normalize_journey(journey, now))
        .collect();

    board.sort_by_key(|d| (d.departure_instant.is_none(), d.departure_instant));
    board
}
