//! Historical coverage checks for requested instants.
//!
//! The validator does not know which products were requested. It reports
//! every coverage threshold the instant crosses and leaves relevance to the
//! caller; fetchers for the affected products fail on their own.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::config::CoverageLimits;
use crate::error::{TimeError, TimeResult};

/// Reason a request cannot proceed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeFault {
    /// Before the earliest date any product covers
    BeforeEpoch,
    /// After `now`
    InFuture,
}

/// Coverage gap for a class of products; the request still proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageWarning {
    BeforeGriddedCoverage,
    BeforeOutlookCoverage,
    BeyondSatelliteRetention,
}

impl fmt::Display for CoverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoverageWarning::BeforeGriddedCoverage => "out of range for gridded data",
            CoverageWarning::BeforeOutlookCoverage => "out of range for convective outlooks",
            CoverageWarning::BeyondSatelliteRetention => "out of range for satellite scans",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub fault: Option<RangeFault>,
    pub warnings: Vec<CoverageWarning>,
}

impl ValidationResult {
    pub fn is_fatal(&self) -> bool {
        self.fault.is_some()
    }

    pub fn has_warning(&self, warning: CoverageWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Check `instant` against the archive coverage limits.
pub fn validate(
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    limits: &CoverageLimits,
) -> ValidationResult {
    let fault = if instant < limits.epoch_utc() {
        Some(RangeFault::BeforeEpoch)
    } else if instant > now {
        Some(RangeFault::InFuture)
    } else {
        None
    };

    let mut warnings = Vec::new();
    if instant < limits.gridded_start_utc() {
        warnings.push(CoverageWarning::BeforeGriddedCoverage);
    }
    if instant < limits.outlook_start_utc() {
        warnings.push(CoverageWarning::BeforeOutlookCoverage);
    }
    if now - instant > limits.satellite_retention() {
        warnings.push(CoverageWarning::BeyondSatelliteRetention);
    }

    ValidationResult { fault, warnings }
}

/// Validate, log every warning and turn a fault into an error.
pub fn check(
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    limits: &CoverageLimits,
) -> TimeResult<Vec<CoverageWarning>> {
    let result = validate(instant, now, limits);

    match result.fault {
        Some(RangeFault::BeforeEpoch) => return Err(TimeError::BeforeEpoch(instant)),
        Some(RangeFault::InFuture) => return Err(TimeError::FutureInstant { instant, now }),
        None => {}
    }

    for warning in &result.warnings {
        warn!(instant = %instant, "Requested time is {}", warning);
    }
    Ok(result.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_recent_instant_is_clean() {
        let now = utc(2023, 11, 10);
        let result = validate(utc(2023, 11, 5), now, &CoverageLimits::default());
        assert!(!result.is_fatal());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_before_epoch_is_fatal() {
        let now = utc(2023, 11, 10);
        let result = validate(utc(1900, 1, 1), now, &CoverageLimits::default());
        assert_eq!(result.fault, Some(RangeFault::BeforeEpoch));
        assert!(check(utc(1900, 1, 1), now, &CoverageLimits::default()).is_err());
    }

    #[test]
    fn test_epoch_day_itself_is_allowed() {
        let now = utc(2023, 11, 10);
        assert!(!validate(utc(1931, 1, 2), now, &CoverageLimits::default()).is_fatal());
        assert!(validate(utc(1931, 1, 1), now, &CoverageLimits::default()).is_fatal());
    }

    #[test]
    fn test_future_is_fatal() {
        let now = utc(2023, 11, 10);
        let result = validate(utc(2023, 11, 11), now, &CoverageLimits::default());
        assert_eq!(result.fault, Some(RangeFault::InFuture));
    }

    #[test]
    fn test_outlook_gap_only() {
        let now = utc(2003, 1, 30);
        let result = validate(utc(2003, 1, 22), now, &CoverageLimits::default());
        assert_eq!(result.warnings, vec![CoverageWarning::BeforeOutlookCoverage]);
    }

    #[test]
    fn test_satellite_retention_boundary() {
        let now = utc(2023, 11, 20);
        let limits = CoverageLimits::default();
        assert!(!validate(utc(2023, 11, 7), now, &limits)
            .has_warning(CoverageWarning::BeyondSatelliteRetention));
        assert!(validate(utc(2023, 11, 6), now, &limits)
            .has_warning(CoverageWarning::BeyondSatelliteRetention));
    }
}
