//! Snapping raw instants onto cadence boundaries.
//!
//! Boundaries are always at or before the instant; this module never rounds
//! forward. Sync and Near alignment share this arithmetic and differ only in
//! the category label the descriptor carries.
//!
//! Six- and twelve-hour products are published some hours after their
//! nominal time. When the instant is closer to `now` than that lag, the
//! candidate is moved back by the lag before snapping so a slot whose data
//! does not exist yet is never selected.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike, Utc};
use tracing::debug;

use crate::cadence::CadenceClass;
use crate::config::PublicationLags;
use crate::error::ConfigError;

/// Resolves cadence boundaries under a given set of publication lags.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryResolver {
    lags: PublicationLags,
}

impl BoundaryResolver {
    /// Resolver for `lags`, rejecting lags longer than a day.
    pub fn new(lags: PublicationLags) -> Result<Self, ConfigError> {
        lags.validate()?;
        Ok(Self { lags })
    }

    pub fn lags(&self) -> &PublicationLags {
        &self.lags
    }

    /// Publication lag that applies to `cadence`, if any.
    pub fn lag_for(&self, cadence: CadenceClass) -> Option<Duration> {
        match cadence {
            CadenceClass::SixHour => Some(self.lags.six_hour()),
            CadenceClass::TwelveHour => Some(self.lags.twelve_hour()),
            CadenceClass::Hourly | CadenceClass::ThreeHour | CadenceClass::Daily => None,
        }
    }

    /// Whether the recency shift is active for this cadence and instant.
    pub fn is_shifted(
        &self,
        cadence: CadenceClass,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        self.lag_for(cadence).is_some_and(|lag| now - instant < lag)
    }

    /// Latest boundary of `cadence` at or before `instant` whose data is
    /// expected to be published by `now`.
    pub fn resolve(
        &self,
        cadence: CadenceClass,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let mut candidate = truncate_to_hour(instant);

        if let Some(lag) = self.lag_for(cadence).filter(|lag| now - instant < *lag) {
            candidate = candidate - lag;
            debug!(
                cadence = %cadence,
                lag_hours = lag.num_hours(),
                "Instant is within publication lag, skipping current slot"
            );
        }

        let interval = cadence.interval_hours();
        let slot = candidate.hour() / interval * interval;
        start_of_day(candidate) + Duration::hours(slot as i64)
    }

    /// Resolve every cadence in `cadences` independently.
    pub fn resolve_all<'a, I>(
        &self,
        cadences: I,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> BTreeMap<CadenceClass, DateTime<Utc>>
    where
        I: IntoIterator<Item = &'a CadenceClass>,
    {
        cadences
            .into_iter()
            .map(|&c| (c, self.resolve(c, instant, now)))
            .collect()
    }
}

/// Midnight UTC of the instant's calendar day.
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&instant.date_naive().and_time(NaiveTime::default()))
}

pub fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(instant) + Duration::hours(instant.hour() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn far_future() -> DateTime<Utc> {
        utc(2030, 1, 1, 0, 0)
    }

    #[test]
    fn test_hourly_truncates() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 14, 59);
        assert_eq!(r.resolve(CadenceClass::Hourly, t, t), utc(2023, 11, 10, 14, 0));
    }

    #[test]
    fn test_daily_truncates() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 23, 59);
        assert_eq!(r.resolve(CadenceClass::Daily, t, t), utc(2023, 11, 10, 0, 0));
    }

    #[test]
    fn test_three_hour_has_no_shift() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 14, 5);
        assert_eq!(r.resolve(CadenceClass::ThreeHour, t, t), utc(2023, 11, 10, 12, 0));
        let t = utc(2023, 11, 10, 0, 20);
        assert_eq!(r.resolve(CadenceClass::ThreeHour, t, t), utc(2023, 11, 10, 0, 0));
    }

    #[test]
    fn test_six_hour_unshifted_early_morning_stays_on_day() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 3, 0);
        assert_eq!(
            r.resolve(CadenceClass::SixHour, t, far_future()),
            utc(2023, 11, 10, 0, 0)
        );
    }

    #[test]
    fn test_six_hour_shift_rolls_to_previous_day() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 5, 30);
        assert_eq!(r.resolve(CadenceClass::SixHour, t, t), utc(2023, 11, 9, 18, 0));
    }

    #[test]
    fn test_twelve_hour_shift() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 14, 0);
        // within 3h: 12Z not yet available
        assert_eq!(r.resolve(CadenceClass::TwelveHour, t, t), utc(2023, 11, 10, 0, 0));
        // 15Z clears the lag for 12Z
        let t = utc(2023, 11, 10, 15, 0);
        assert_eq!(r.resolve(CadenceClass::TwelveHour, t, t), utc(2023, 11, 10, 12, 0));
        // before 03Z rolls back to yesterday's 12Z
        let t = utc(2023, 11, 10, 2, 0);
        assert_eq!(r.resolve(CadenceClass::TwelveHour, t, t), utc(2023, 11, 9, 12, 0));
    }

    #[test]
    fn test_twelve_hour_shift_expires_after_lag() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 13, 0);
        let now = t + Duration::hours(3);
        assert!(!r.is_shifted(CadenceClass::TwelveHour, t, now));
        assert_eq!(r.resolve(CadenceClass::TwelveHour, t, now), utc(2023, 11, 10, 12, 0));
    }

    #[test]
    fn test_custom_lag() {
        let r = BoundaryResolver::new(PublicationLags {
            six_hour_lag_hours: 4,
            twelve_hour_lag_hours: 3,
        })
        .unwrap();
        let t = utc(2023, 11, 10, 16, 0);
        assert_eq!(r.resolve(CadenceClass::SixHour, t, t), utc(2023, 11, 10, 12, 0));
    }

    #[test]
    fn test_resolve_all_keeps_every_class() {
        let r = BoundaryResolver::default();
        let t = utc(2023, 11, 10, 14, 5);
        let all = r.resolve_all(CadenceClass::all(), t, far_future());
        assert_eq!(all.len(), 5);
        assert_eq!(all[&CadenceClass::Hourly], utc(2023, 11, 10, 14, 0));
        assert_eq!(all[&CadenceClass::SixHour], utc(2023, 11, 10, 12, 0));
        assert_eq!(all[&CadenceClass::TwelveHour], utc(2023, 11, 10, 12, 0));
    }

    #[test]
    fn test_new_rejects_lag_beyond_a_day() {
        let err = BoundaryResolver::new(PublicationLags {
            six_hour_lag_hours: u32::MAX,
            twelve_hour_lag_hours: 3,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
