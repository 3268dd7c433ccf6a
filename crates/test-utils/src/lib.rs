//! Shared test utilities for the weather-mapgen workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Fixed instants for the documented alignment scenarios
//! - Instant sweeps across a day
//! - Temporary alignment config files
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_utc_eq, fixtures, utc};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

#[doc(hidden)]
pub use chrono;

/// Macro asserting a UTC timestamp equals an RFC 3339 string.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_utc_eq;
///
/// assert_utc_eq!(descriptor.reference_time(), "2023-11-10T12:00:00Z");
/// ```
#[macro_export]
macro_rules! assert_utc_eq {
    ($actual:expr, $expected:expr) => {{
        let actual: $crate::chrono::DateTime<$crate::chrono::Utc> = $actual;
        let expected = $crate::parse_utc($expected);
        if actual != expected {
            panic!(
                "assertion failed: `(left == right)`\n  left: `{}`,\n right: `{}`",
                actual.to_rfc3339(),
                expected.to_rfc3339()
            );
        }
    }};
}

/// Macro asserting an optional timestamp is present and equals an RFC 3339 string.
#[macro_export]
macro_rules! assert_some_utc_eq {
    ($actual:expr, $expected:expr) => {{
        match $actual {
            Some(actual) => $crate::assert_utc_eq!(actual, $expected),
            None => panic!("expected a timestamp of {}, got None", $expected),
        }
    }};
}
