//! Stop counting and interchange descriptors.

use serde::Serialize;

use crate::tfnsw::types::{Journey, Leg};

use super::PLACEHOLDER;
use super::classify::classify;

/// One line change within a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeDetail {
    /// Line boarded at the change.
    pub line: String,

    /// Station where the change happens.
    pub station: String,

    /// Platform of the onward service.
    pub platform: String,
}

/// Total rail stops traversed across a journey.
///
/// Each rail leg contributes its stop sequence length minus one (the
/// boarding stop is not itself a stop); non-rail legs contribute nothing.
pub fn count_rail_stops(legs: &[Leg]) -> u32 {
    legs.iter()
        .filter(|leg| classify(leg.class_code()).is_rail())
        .map(|leg| {
            let len = leg.stop_sequence.as_ref().map_or(0, Vec::len);
            len.saturating_sub(1) as u32
        })
        .sum()
}

/// Interchange descriptors for a journey: one per transit (non-walking)
/// leg after the first, carrying the onward line, station, and platform.
///
/// Descriptors without a resolvable line name are dropped. The journey's
/// `interchanges` count is reported verbatim elsewhere, so the count and
/// this list's length may legitimately diverge.
pub fn interchange_details(journey: &Journey) -> Vec<InterchangeDetail> {
    if journey.interchanges.unwrap_or(0) == 0 {
        return Vec::new();
    }

    journey
        .legs()
        .iter()
        .filter(|leg| !classify(leg.class_code()).is_walk())
        .skip(1)
        .map(|leg| {
            let line = leg
                .transportation
                .as_ref()
                .and_then(|t| t.disassembled_name.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let origin = leg.origin.as_ref();
            let station = origin
                .and_then(|o| o.disassembled_name.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let platform = origin
                .and_then(|o| o.properties.as_ref())
                .and_then(|p| p.platform_name.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            InterchangeDetail {
                line,
                station,
                platform,
            }
        })
        .filter(|d| d.line != PLACEHOLDER)
        .collect()
}
