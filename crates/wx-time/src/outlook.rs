//! Convective outlook issuance schedules.
//!
//! Each outlook class is issued at a fixed, irregular set of times per day.
//! The schedules live in static tables so a change in issuance timing is a
//! data edit.

use std::fmt;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::start_of_day;
use crate::mode::OutlookPolicy;

/// One of the four convective outlook products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlookClass {
    Day1,
    Day2,
    Day3,
    /// Probabilistic days 4-8, one product per day
    Day4Plus,
}

impl OutlookClass {
    pub fn all() -> &'static [OutlookClass] {
        &[
            OutlookClass::Day1,
            OutlookClass::Day2,
            OutlookClass::Day3,
            OutlookClass::Day4Plus,
        ]
    }

    pub fn schedule(&self) -> &'static OutlookSchedule {
        match self {
            OutlookClass::Day1 => &DAY1,
            OutlookClass::Day2 => &DAY2,
            OutlookClass::Day3 => &DAY3,
            OutlookClass::Day4Plus => &DAY4_PLUS,
        }
    }
}

impl fmt::Display for OutlookClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlookClass::Day1 => "day 1",
            OutlookClass::Day2 => "day 2",
            OutlookClass::Day3 => "day 3",
            OutlookClass::Day4Plus => "day 4-8",
        })
    }
}

/// Time of day at which an outlook is issued (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IssuanceTime {
    pub hour: u32,
    pub minute: u32,
}

impl IssuanceTime {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    fn offset(&self) -> Duration {
        Duration::minutes(self.minute_of_day() as i64)
    }
}

/// Issuance schedule of one outlook class.
#[derive(Debug)]
pub struct OutlookSchedule {
    /// Issuance times, earliest first
    pub issuances: &'static [IssuanceTime],
    /// Products keyed by date only; resolved timestamps are reported at 00Z
    pub whole_day: bool,
}

static DAY1: OutlookSchedule = OutlookSchedule {
    issuances: &[
        IssuanceTime::new(1, 0),
        IssuanceTime::new(12, 0),
        IssuanceTime::new(13, 0),
        IssuanceTime::new(16, 30),
        IssuanceTime::new(20, 0),
    ],
    whole_day: false,
};

static DAY2: OutlookSchedule = OutlookSchedule {
    issuances: &[IssuanceTime::new(6, 0), IssuanceTime::new(17, 30)],
    whole_day: false,
};

static DAY3: OutlookSchedule = OutlookSchedule {
    issuances: &[IssuanceTime::new(7, 30)],
    whole_day: false,
};

static DAY4_PLUS: OutlookSchedule = OutlookSchedule {
    issuances: &[IssuanceTime::new(9, 0)],
    whole_day: true,
};

impl OutlookSchedule {
    /// Most recent issuance at or before `instant`, rolling back to the
    /// previous day's last issuance before the first one of the day.
    fn most_recent(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let day = start_of_day(instant);
        let minute_of_day = instant.hour() * 60 + instant.minute();

        match self
            .issuances
            .iter()
            .rev()
            .find(|issuance| issuance.minute_of_day() <= minute_of_day)
        {
            Some(issuance) => day + issuance.offset(),
            None => {
                let last = self
                    .issuances
                    .last()
                    .map(IssuanceTime::offset)
                    .unwrap_or_else(Duration::zero);
                day - Duration::days(1) + last
            }
        }
    }

    /// The single marker used for a fully past day.
    fn daily_marker(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let first = self
            .issuances
            .first()
            .map(IssuanceTime::offset)
            .unwrap_or_else(Duration::zero);
        start_of_day(instant) + first
    }

    fn finish(&self, issued: DateTime<Utc>) -> DateTime<Utc> {
        if self.whole_day {
            start_of_day(issued)
        } else {
            issued
        }
    }
}

/// Resolve the canonical issuance timestamp of `class` for `instant`.
///
/// Under [`OutlookPolicy::Latest`], instants more than a day older than `now`
/// skip the intraday scan and collapse to one marker per day.
pub fn resolve_outlook(
    class: OutlookClass,
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: OutlookPolicy,
) -> DateTime<Utc> {
    let schedule = class.schedule();

    let issued = match policy {
        OutlookPolicy::Latest if now - instant > Duration::days(1) => {
            debug!(outlook = %class, "Instant is a full day old, using daily marker");
            schedule.daily_marker(instant)
        }
        OutlookPolicy::Recent | OutlookPolicy::Latest => schedule.most_recent(instant),
    };

    schedule.finish(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_schedules_are_sorted() {
        for class in OutlookClass::all() {
            let issuances = class.schedule().issuances;
            assert!(!issuances.is_empty());
            assert!(issuances.windows(2).all(|w| w[0] < w[1]), "{class} unsorted");
        }
    }

    #[test]
    fn test_day1_exact_issuance_is_inclusive() {
        let t = utc(2023, 11, 10, 16, 30);
        assert_eq!(resolve_outlook(OutlookClass::Day1, t, t, OutlookPolicy::Recent), t);
    }

    #[test]
    fn test_day1_half_hour_before_issuance() {
        let t = utc(2023, 11, 10, 16, 29);
        assert_eq!(
            resolve_outlook(OutlookClass::Day1, t, t, OutlookPolicy::Recent),
            utc(2023, 11, 10, 13, 0)
        );
    }

    #[test]
    fn test_day1_before_first_issuance() {
        let t = utc(2023, 11, 10, 0, 59);
        assert_eq!(
            resolve_outlook(OutlookClass::Day1, t, t, OutlookPolicy::Recent),
            utc(2023, 11, 9, 20, 0)
        );
    }

    #[test]
    fn test_day3_single_issuance() {
        let t = utc(2023, 11, 10, 7, 29);
        assert_eq!(
            resolve_outlook(OutlookClass::Day3, t, t, OutlookPolicy::Recent),
            utc(2023, 11, 9, 7, 30)
        );
        let t = utc(2023, 11, 10, 7, 30);
        assert_eq!(resolve_outlook(OutlookClass::Day3, t, t, OutlookPolicy::Recent), t);
    }

    #[test]
    fn test_day4_plus_is_whole_day() {
        let t = utc(2023, 11, 10, 10, 0);
        assert_eq!(
            resolve_outlook(OutlookClass::Day4Plus, t, t, OutlookPolicy::Recent),
            utc(2023, 11, 10, 0, 0)
        );
        let t = utc(2023, 11, 10, 8, 0);
        assert_eq!(
            resolve_outlook(OutlookClass::Day4Plus, t, t, OutlookPolicy::Recent),
            utc(2023, 11, 9, 0, 0)
        );
    }

    #[test]
    fn test_latest_collapses_old_days() {
        let t = utc(2023, 11, 10, 22, 0);
        let now = utc(2023, 11, 15, 0, 0);
        assert_eq!(
            resolve_outlook(OutlookClass::Day1, t, now, OutlookPolicy::Latest),
            utc(2023, 11, 10, 1, 0)
        );
        assert_eq!(
            resolve_outlook(OutlookClass::Day2, t, now, OutlookPolicy::Latest),
            utc(2023, 11, 10, 6, 0)
        );
        assert_eq!(
            resolve_outlook(OutlookClass::Day4Plus, t, now, OutlookPolicy::Latest),
            utc(2023, 11, 10, 0, 0)
        );
    }

    #[test]
    fn test_latest_scans_within_a_day() {
        let t = utc(2023, 11, 10, 22, 0);
        let now = utc(2023, 11, 11, 21, 0);
        assert_eq!(
            resolve_outlook(OutlookClass::Day1, t, now, OutlookPolicy::Latest),
            utc(2023, 11, 10, 20, 0)
        );
    }

    #[test]
    fn test_recent_ignores_age() {
        let t = utc(2023, 11, 10, 22, 0);
        let now = utc(2024, 1, 1, 0, 0);
        assert_eq!(
            resolve_outlook(OutlookClass::Day1, t, now, OutlookPolicy::Recent),
            utc(2023, 11, 10, 20, 0)
        );
    }
}
