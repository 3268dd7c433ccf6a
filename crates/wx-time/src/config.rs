//! Alignment configuration.
//!
//! Every field has a default, so an empty YAML document yields the
//! built-in behaviour:
//!
//! ```yaml
//! mode: sync
//! outlook_policy: recent
//! lags:
//!   six_hour_lag_hours: 6
//!   twelve_hour_lag_hours: 3
//! coverage:
//!   epoch: 1931-01-02
//!   gridded_start: 1979-01-01
//!   outlook_start: 2003-01-23
//!   satellite_retention_days: 13
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::mode::{AlignmentMode, OutlookPolicy};

/// Root alignment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default)]
    pub mode: AlignmentMode,
    #[serde(default)]
    pub outlook_policy: OutlookPolicy,
    #[serde(default)]
    pub lags: PublicationLags,
    #[serde(default)]
    pub coverage: CoverageLimits,
}

impl AlignmentConfig {
    /// Parse and check a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document, treat it as all defaults
        let config: AlignmentConfig = if content.trim().is_empty() {
            AlignmentConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        debug!(mode = %config.mode, policy = %config.outlook_policy, "Loaded alignment config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lags.validate()?;
        self.coverage.validate()
    }
}

/// Publication lag applied to recent requests.
///
/// A boundary is skipped when the instant is closer to now than the lag,
/// because the upstream product for that slot is not yet published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationLags {
    #[serde(default = "default_six_hour_lag")]
    pub six_hour_lag_hours: u32,
    #[serde(default = "default_twelve_hour_lag")]
    pub twelve_hour_lag_hours: u32,
}

fn default_six_hour_lag() -> u32 {
    6
}

fn default_twelve_hour_lag() -> u32 {
    3
}

impl Default for PublicationLags {
    fn default() -> Self {
        Self {
            six_hour_lag_hours: default_six_hour_lag(),
            twelve_hour_lag_hours: default_twelve_hour_lag(),
        }
    }
}

impl PublicationLags {
    pub fn six_hour(&self) -> Duration {
        Duration::hours(self.six_hour_lag_hours as i64)
    }

    pub fn twelve_hour(&self) -> Duration {
        Duration::hours(self.twelve_hour_lag_hours as i64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.six_hour_lag_hours > 24 || self.twelve_hour_lag_hours > 24 {
            return Err(ConfigError::Invalid(format!(
                "publication lags must not exceed 24 hours (six-hour: {}, twelve-hour: {})",
                self.six_hour_lag_hours, self.twelve_hour_lag_hours
            )));
        }
        Ok(())
    }
}

/// Historical coverage of the upstream archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageLimits {
    /// Nothing before this date can be mapped
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
    /// First date with gridded reanalysis data
    #[serde(default = "default_gridded_start")]
    pub gridded_start: NaiveDate,
    /// First date with archived convective outlooks
    #[serde(default = "default_outlook_start")]
    pub outlook_start: NaiveDate,
    /// How long satellite scans are retained
    #[serde(default = "default_satellite_retention_days")]
    pub satellite_retention_days: u32,
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1931, 1, 2).unwrap_or_default()
}

fn default_gridded_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1979, 1, 1).unwrap_or_default()
}

fn default_outlook_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2003, 1, 23).unwrap_or_default()
}

fn default_satellite_retention_days() -> u32 {
    13
}

impl Default for CoverageLimits {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            gridded_start: default_gridded_start(),
            outlook_start: default_outlook_start(),
            satellite_retention_days: default_satellite_retention_days(),
        }
    }
}

impl CoverageLimits {
    pub fn epoch_utc(&self) -> DateTime<Utc> {
        midnight_utc(self.epoch)
    }

    pub fn gridded_start_utc(&self) -> DateTime<Utc> {
        midnight_utc(self.gridded_start)
    }

    pub fn outlook_start_utc(&self) -> DateTime<Utc> {
        midnight_utc(self.outlook_start)
    }

    pub fn satellite_retention(&self) -> Duration {
        Duration::days(self.satellite_retention_days as i64)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gridded_start < self.epoch || self.outlook_start < self.epoch {
            return Err(ConfigError::Invalid(format!(
                "coverage start dates must not precede the epoch {}",
                self.epoch
            )));
        }
        Ok(())
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}
