//! Common test fixtures for alignment tests.
//!
//! This module provides pre-defined instants and configuration documents
//! that represent common scenarios in map generation requests.

use std::io::Write;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::NamedTempFile;

/// Build a UTC timestamp, panicking on an impossible date.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture time {year}-{month}-{day} {hour}:{minute}"))
}

/// Parse an RFC 3339 string, panicking on malformed input.
pub fn parse_utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap_or_else(|e| panic!("invalid fixture timestamp '{s}': {e}"))
        .with_timezone(&Utc)
}

/// Instants used by the documented end-to-end scenarios.
pub mod instants {
    use super::utc;
    use chrono::{DateTime, Utc};

    /// Mid-afternoon, between the 13Z and 1630Z day 1 issuances
    pub fn afternoon() -> DateTime<Utc> {
        utc(2023, 11, 10, 14, 5)
    }

    /// Just after midnight, before any day 2 issuance
    pub fn after_midnight() -> DateTime<Utc> {
        utc(2023, 11, 10, 0, 20)
    }

    /// Five minutes into the 12Z six-hour slot
    pub fn just_after_noon() -> DateTime<Utc> {
        utc(2023, 11, 10, 12, 5)
    }

    /// `now` for [`just_after_noon`]
    pub fn just_after_noon_now() -> DateTime<Utc> {
        utc(2023, 11, 10, 12, 10)
    }

    /// A `now` far enough after the 2023 scenarios that no lag applies
    pub fn settled_now() -> DateTime<Utc> {
        utc(2023, 11, 20, 0, 0)
    }

    /// Before any archive coverage
    pub fn before_epoch() -> DateTime<Utc> {
        utc(1900, 1, 1, 0, 0)
    }

    /// Before gridded reanalysis coverage
    pub fn pre_reanalysis() -> DateTime<Utc> {
        utc(1970, 1, 1, 0, 0)
    }
}

/// Alignment configuration documents.
pub mod config {
    /// Everything at its default.
    pub const EMPTY: &str = "";

    /// Async mode with a shorter six-hour lag and longer satellite retention.
    pub const ASYNC_SHORT_LAG: &str = r#"
mode: async
outlook_policy: latest
lags:
  six_hour_lag_hours: 4
  twelve_hour_lag_hours: 3
coverage:
  satellite_retention_days: 30
"#;

    /// Not a valid mode.
    pub const INVALID_MODE: &str = "mode: sideways\n";
}

/// Write `contents` to a temporary `.yaml` file that lives as long as the handle.
pub fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}
