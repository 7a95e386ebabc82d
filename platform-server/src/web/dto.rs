//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::Departure;
use crate::tfnsw::{StopFinderResponse, StopLocation};

/// Query parameters for `/api/departures`.
#[derive(Debug, Deserialize)]
pub struct DeparturesQuery {
    /// Origin stop id; falls back to the configured default
    pub origin: Option<String>,

    /// Destination stop id; falls back to the configured default
    pub destination: Option<String>,

    /// Number of journeys to request upstream
    pub count: Option<u32>,
}

/// Response body for `/api/departures`.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// When this board was generated (ISO 8601)
    pub updated: String,

    /// Time-ascending departure rows
    pub departures: Vec<Departure>,
}

/// Query parameters for `/api/stops`.
#[derive(Debug, Deserialize)]
pub struct StopsQuery {
    /// Free-text station search query
    pub q: Option<String>,
}

/// Response body for `/api/stops`.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

impl StopsResponse {
    /// Keep only actual stops from a stop finder response.
    pub fn from_locations(response: StopFinderResponse) -> Self {
        let stops = response
            .locations
            .unwrap_or_default()
            .into_iter()
            .filter(StopLocation::is_stop)
            .map(StopResult::from_location)
            .collect();
        Self { stops }
    }
}

/// A stop offered in station search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopResult {
    /// Global stop id, usable as a departures query parameter
    pub id: String,

    /// Full location name
    pub name: String,

    /// Short display name
    pub disassembled_name: String,
}

impl StopResult {
    fn from_location(location: StopLocation) -> Self {
        Self {
            id: location.id.unwrap_or_default(),
            name: location.name.unwrap_or_default(),
            disassembled_name: location.disassembled_name.unwrap_or_default(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_results_keep_only_stop_locations() {
        let response: StopFinderResponse = serde_json::from_str(
            r#"{
                "locations": [
                    {"id": "200080", "name": "Wynyard Station, Sydney", "disassembledName": "Wynyard", "type": "stop"},
                    {"id": "10111010", "name": "Wynyard Park, Sydney", "type": "poi"},
                    {"id": "200081", "name": "Wynyard, Stand A", "disassembledName": "Wynyard Stand A", "type": "stop"}
                ]
            }"#,
        )
        .unwrap();

        let stops = StopsResponse::from_locations(response).stops;
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].id, "200080");
        assert_eq!(stops[0].disassembled_name, "Wynyard");
        assert_eq!(stops[1].id, "200081");
    }

    #[test]
    fn stop_results_serialize_camel_case() {
        let result = StopResult {
            id: "200080".into(),
            name: "Wynyard Station, Sydney".into(),
            disassembled_name: "Wynyard".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["disassembledName"], "Wynyard");
    }

    #[test]
    fn empty_locations_yield_empty_stops() {
        let response: StopFinderResponse = serde_json::from_str("{}").unwrap();
        assert!(StopsResponse::from_locations(response).stops.is_empty());
    }
}
