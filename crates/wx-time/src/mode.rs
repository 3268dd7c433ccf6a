//! Alignment modes, outlook selection policies and the resulting category labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::cadence::CadenceClass;
use crate::error::InstantParseError;

/// How a raw instant is converted to product boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Use the instant unmodified
    Raw,
    /// Snap every layer to the primary cadence boundary
    #[default]
    Sync,
    /// Same arithmetic as Sync, labelled as best single time
    Near,
    /// Resolve every cadence independently
    Async,
}

impl AlignmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentMode::Raw => "raw",
            AlignmentMode::Sync => "sync",
            AlignmentMode::Near => "near",
            AlignmentMode::Async => "async",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentMode {
    type Err = InstantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(AlignmentMode::Raw),
            "sync" => Ok(AlignmentMode::Sync),
            "near" => Ok(AlignmentMode::Near),
            "async" => Ok(AlignmentMode::Async),
            _ => Err(InstantParseError::InvalidField {
                field: "alignment mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Which outlook issuance to pick for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlookPolicy {
    /// Most recent issuance at or before the instant
    #[default]
    Recent,
    /// One marker per day once the day is fully in the past
    Latest,
}

impl fmt::Display for OutlookPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlookPolicy::Recent => "recent",
            OutlookPolicy::Latest => "latest",
        })
    }
}

impl FromStr for OutlookPolicy {
    type Err = InstantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(OutlookPolicy::Recent),
            "latest" => Ok(OutlookPolicy::Latest),
            _ => Err(InstantParseError::InvalidField {
                field: "outlook policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Label attached to a descriptor, read by title generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentCategory {
    Raw,
    Sync,
    Near,
    /// Asynchronous, keyed by the finest requested cadence
    Async(CadenceClass),
}

impl AlignmentCategory {
    /// Suffix appended to map titles.
    pub fn title_suffix(&self) -> &'static str {
        match self {
            AlignmentCategory::Raw => "Raw for Time",
            AlignmentCategory::Sync => "Synced",
            AlignmentCategory::Near => "Nearest per Item",
            AlignmentCategory::Async(_) => "Asynchronous",
        }
    }
}

impl fmt::Display for AlignmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentCategory::Raw => f.write_str("raw"),
            AlignmentCategory::Sync => f.write_str("sync"),
            AlignmentCategory::Near => f.write_str("near"),
            AlignmentCategory::Async(c) => write!(f, "async-{}", c.interval_hours()),
        }
    }
}

impl Serialize for AlignmentCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
