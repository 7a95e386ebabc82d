//! Departure/arrival instants, delay, and countdown arithmetic.
//!
//! All upstream timestamps are ISO 8601 strings; a string that fails to
//! parse counts as missing. Minute arithmetic reproduces JavaScript's
//! `Math.round((a - b) / 60000)`: halves round toward positive infinity.

use chrono::{DateTime, Utc};
use chrono_tz::Australia::Sydney;

use crate::tfnsw::types::Location;

use super::PLACEHOLDER;

/// A departure is "catchable" when strictly more than this many minutes away.
pub const CATCHABLE_LEEWAY_MINS: i64 = 5;

/// Parse an ISO 8601 timestamp, treating parse failure as absence.
pub fn parse_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw?)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Pick the effective timestamp string: realtime estimate if present,
/// otherwise the timetabled value.
pub fn resolve_raw<'a>(
    planned: Option<&'a str>,
    estimated: Option<&'a str>,
) -> Option<&'a str> {
    estimated.or(planned)
}

/// Round a millisecond difference to whole minutes, half up.
pub fn round_minutes(delta_ms: i64) -> i64 {
    (delta_ms + 30_000).div_euclid(60_000)
}

/// Whole minutes from `earlier` to `later`, either sign.
pub fn minutes_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    round_minutes((later - earlier).num_milliseconds())
}

/// Delay at a boarding location: estimated minus planned departure.
///
/// Zero when either timestamp is missing. Negative values (early
/// departures) are preserved.
pub fn delay_minutes(origin: &Location) -> i64 {
    let planned = parse_instant(origin.departure_time_planned.as_deref());
    let estimated = parse_instant(origin.departure_time_estimated.as_deref());
    match (planned, estimated) {
        (Some(planned), Some(estimated)) => minutes_between(estimated, planned),
        _ => 0,
    }
}

/// Render an instant as zero-padded 24-hour `HH:MM` in Sydney local time.
///
/// The service covers a single metropolitan region; caller timezones are
/// deliberately not honoured.
pub fn local_hhmm(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        Some(t) => t.with_timezone(&Sydney).format("%H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Whether a departure is far enough away to reasonably act on.
///
/// A UI hint only, never a filter.
pub fn catchable(minutes_until_departure: Option<i64>) -> bool {
    minutes_until_departure.is_some_and(|m| m > CATCHABLE_LEEWAY_MINS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: &str) -> DateTime<Utc> {
        parse_instant(Some(s)).unwrap()
    }

    #[test]
    fn rounding_matches_math_round() {
        assert_eq!(round_minutes(0), 0);
        assert_eq!(round_minutes(29_999), 0);
        assert_eq!(round_minutes(30_000), 1); // half up
        assert_eq!(round_minutes(90_000), 2);
        assert_eq!(round_minutes(-29_999), 0);
        assert_eq!(round_minutes(-30_000), 0); // Math.round(-0.5) == 0
        assert_eq!(round_minutes(-90_000), -1); // Math.round(-1.5) == -1
        assert_eq!(round_minutes(-91_000), -2);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_instant(Some("2026-03-02T23:00:00Z")).is_some());
        assert!(parse_instant(Some("not a time")).is_none());
        assert!(parse_instant(Some("")).is_none());
        assert!(parse_instant(None).is_none());
    }

    #[test]
    fn estimate_preferred_over_plan() {
        assert_eq!(resolve_raw(Some("p"), Some("e")), Some("e"));
        assert_eq!(resolve_raw(Some("p"), None), Some("p"));
        assert_eq!(resolve_raw(None, None), None);
    }

    #[test]
    fn delay_needs_both_timestamps() {
        let mut origin = Location::default();
        assert_eq!(delay_minutes(&origin), 0);

        origin.departure_time_planned = Some("2026-03-02T23:00:00Z".into());
        assert_eq!(delay_minutes(&origin), 0);

        origin.departure_time_estimated = Some("2026-03-02T23:02:00Z".into());
        assert_eq!(delay_minutes(&origin), 2);

        // Early departure stays negative
        origin.departure_time_estimated = Some("2026-03-02T22:57:00Z".into());
        assert_eq!(delay_minutes(&origin), -3);
    }

    #[test]
    fn minutes_between_signs() {
        let a = at("2026-03-02T23:00:00Z");
        let b = at("2026-03-02T23:07:30Z");
        assert_eq!(minutes_between(b, a), 8); // 7.5 rounds up
        assert_eq!(minutes_between(a, b), -7); // -7.5 rounds toward zero
    }

    #[test]
    fn sydney_local_rendering() {
        // AEDT (UTC+11): 23:05 UTC is 10:05 the next day in Sydney.
        let t = Utc.with_ymd_and_hms(2026, 3, 2, 23, 5, 0).unwrap();
        assert_eq!(local_hhmm(Some(t)), "10:05");

        // AEST (UTC+10) outside daylight saving.
        let t = Utc.with_ymd_and_hms(2026, 6, 10, 0, 30, 0).unwrap();
        assert_eq!(local_hhmm(Some(t)), "10:30");

        assert_eq!(local_hhmm(None), "?");
    }

    #[test]
    fn catchable_threshold_is_strict() {
        assert!(!catchable(None));
        assert!(!catchable(Some(5)));
        assert!(!catchable(Some(0)));
        assert!(!catchable(Some(-2)));
        assert!(catchable(Some(6)));
    }
}
