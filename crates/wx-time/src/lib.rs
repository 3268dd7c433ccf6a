//! Temporal alignment for composite weather maps.
//!
//! Converts an operator-entered time into the canonical timestamps each
//! upstream product publishes at: cadence boundaries for observations and
//! model runs, issuance times for convective outlooks. Every function takes
//! `now` explicitly and never reads the wall clock.

pub mod boundary;
pub mod cadence;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod instant;
pub mod mode;
pub mod outlook;
pub mod validation;

pub use boundary::BoundaryResolver;
pub use cadence::{classify, CadenceClass, Classification, ProductClass, ProductCode};
pub use config::{AlignmentConfig, CoverageLimits, PublicationLags};
pub use descriptor::{DisplayStamps, RecencyFlags, TemporalDescriptor, TemporalEngine};
pub use error::{ConfigError, InstantParseError, TimeError, TimeResult};
pub use instant::RawInstant;
pub use mode::{AlignmentCategory, AlignmentMode, OutlookPolicy};
pub use outlook::{resolve_outlook, IssuanceTime, OutlookClass};
pub use validation::{validate, CoverageWarning, RangeFault, ValidationResult};
