//! Activity interval resolution and validation.
//!
//! Client-reported intervals are bounded to close an abuse vector, not to
//! model shift length: a single entry may never claim more than 8 hours.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum accepted interval duration in seconds (8 hours, inclusive).
pub const MAX_INTERVAL_SECONDS: i64 = 28_800;

/// Resolve interval bounds for an activity entry.
///
/// When either timestamp is missing the bounds are synthesized from the
/// reported durations: `start = now - (active + idle)`, `end = now`.
pub fn resolve_bounds(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    active_seconds: i64,
    idle_seconds: i64,
    now: Timestamp,
) -> (Timestamp, Timestamp) {
    let start = start
        .unwrap_or_else(|| now - chrono::Duration::seconds(active_seconds + idle_seconds));
    let end = end.unwrap_or(now);
    (start, end)
}

/// Validate the reported second counters.
pub fn validate_seconds(active_seconds: i64, idle_seconds: i64) -> Result<(), CoreError> {
    if active_seconds < 0 {
        return Err(CoreError::Validation(
            "active_seconds must be non-negative".into(),
        ));
    }
    if idle_seconds < 0 {
        return Err(CoreError::Validation(
            "idle_seconds must be non-negative".into(),
        ));
    }
    Ok(())
}

/// Validate resolved interval bounds.
///
/// Requires `start < end` and a duration of at most
/// [`MAX_INTERVAL_SECONDS`] (the 28800-second boundary itself is
/// accepted).
pub fn validate_interval(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(
            "timestamp_start must be before timestamp_end".into(),
        ));
    }
    let duration = (end - start).num_seconds();
    if duration > MAX_INTERVAL_SECONDS {
        return Err(CoreError::Validation(format!(
            "interval duration {duration}s exceeds the {MAX_INTERVAL_SECONDS}s maximum"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn synthesizes_missing_bounds_from_durations() {
        let now = t0();
        let (start, end) = resolve_bounds(None, None, 600, 120, now);
        assert_eq!(end, now);
        assert_eq!(start, now - Duration::seconds(720));
    }

    #[test]
    fn keeps_explicit_bounds() {
        let now = t0();
        let start = now - Duration::seconds(300);
        let (s, e) = resolve_bounds(Some(start), Some(now), 9999, 9999, now);
        assert_eq!((s, e), (start, now));
    }

    #[test]
    fn synthesizes_only_the_missing_side() {
        let now = t0();
        let start = now - Duration::seconds(100);
        let (s, e) = resolve_bounds(Some(start), None, 50, 0, now);
        assert_eq!(s, start);
        assert_eq!(e, now);
    }

    #[test]
    fn rejects_inverted_interval() {
        let now = t0();
        assert!(validate_interval(now, now - Duration::seconds(1)).is_err());
    }

    #[test]
    fn rejects_zero_length_interval() {
        let now = t0();
        assert!(validate_interval(now, now).is_err());
    }

    #[test]
    fn accepts_exactly_eight_hours() {
        let now = t0();
        let start = now - Duration::seconds(MAX_INTERVAL_SECONDS);
        assert!(validate_interval(start, now).is_ok());
    }

    #[test]
    fn rejects_one_second_over_eight_hours() {
        let now = t0();
        let start = now - Duration::seconds(MAX_INTERVAL_SECONDS + 1);
        assert!(validate_interval(start, now).is_err());
    }

    #[test]
    fn rejects_negative_counters() {
        assert!(validate_seconds(-1, 0).is_err());
        assert!(validate_seconds(0, -1).is_err());
        assert!(validate_seconds(0, 0).is_ok());
    }
}
