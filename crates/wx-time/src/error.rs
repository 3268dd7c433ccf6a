//! Error types for temporal alignment.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cadence::CadenceClass;
use crate::mode::AlignmentMode;

/// Result type alias using TimeError.
pub type TimeResult<T> = Result<T, TimeError>;

/// Primary error type for descriptor construction.
#[derive(Debug, Error)]
pub enum TimeError {
    // === Range Errors ===
    #[error("Requested time {0} is before the earliest supported date")]
    BeforeEpoch(DateTime<Utc>),

    #[error("Requested time {instant} is in the future (now is {now})")]
    FutureInstant {
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    // === Caller Contract Errors ===
    #[error("Raw alignment cannot be used with {0} products")]
    RawWithCadence(CadenceClass),

    #[error("Alignment mode '{0}' needs at least one cadence-based product")]
    NoCadence(AlignmentMode),

    // === Input Errors ===
    #[error(transparent)]
    Parse(#[from] InstantParseError),
}

impl TimeError {
    /// Whether the error means the caller built an inconsistent request,
    /// as opposed to the operator asking for an unsupported time.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, TimeError::RawWithCadence(_) | TimeError::NoCadence(_))
    }
}

/// Errors raised while parsing an operator-entered time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Invalid {field} value '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("No such calendar time: {0}")]
    NonexistentTime(String),
}

/// Errors raised while loading alignment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse alignment config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid alignment config: {0}")]
    Invalid(String),
}
