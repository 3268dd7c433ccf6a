//! Instant generators for sweeping schedules.
//!
//! These generators create predictable sequences of instants that can be
//! used to check monotonicity and coverage of boundary resolution.

use chrono::{DateTime, Duration, Utc};

/// Instants from `start` (inclusive) every `step_minutes` for `count` steps.
///
/// # Example
///
/// ```
/// use test_utils::{instant_sweep, utc};
///
/// let sweep = instant_sweep(utc(2023, 11, 10, 0, 0), 30, 4);
/// assert_eq!(sweep.len(), 4);
/// assert_eq!(sweep[3], utc(2023, 11, 10, 1, 30));
/// ```
pub fn instant_sweep(start: DateTime<Utc>, step_minutes: i64, count: usize) -> Vec<DateTime<Utc>> {
    (0..count)
        .map(|i| start + Duration::minutes(step_minutes * i as i64))
        .collect()
}

/// Every minute of the calendar day starting at `day_start`.
pub fn minutes_of_day(day_start: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    instant_sweep(day_start, 1, 24 * 60)
}

/// Every top of the hour of the calendar day starting at `day_start`.
pub fn hours_of_day(day_start: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    instant_sweep(day_start, 60, 24)
}
