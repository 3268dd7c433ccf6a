//! Temporal descriptor construction.
//!
//! A [`TemporalDescriptor`] is built once per map request and handed to every
//! product fetcher, each of which reads the one or two fields relevant to its
//! own cadence or outlook class. Fields for classes that were not requested
//! are absent rather than defaulted.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::boundary::BoundaryResolver;
use crate::cadence::{classify, CadenceClass, ProductCode};
use crate::config::{AlignmentConfig, CoverageLimits};
use crate::error::{ConfigError, TimeError, TimeResult};
use crate::instant::RawInstant;
use crate::mode::{AlignmentCategory, AlignmentMode, OutlookPolicy};
use crate::outlook::{resolve_outlook, OutlookClass};
use crate::validation::{self, CoverageWarning};

/// Whether the raw instant falls inside each publication lag window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecencyFlags {
    pub within_twelve_hour_lag: bool,
    pub within_six_hour_lag: bool,
}

/// Strings derived from the reference time for titles and archive layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStamps {
    /// `2023-11-10-1200Z`
    pub stamp: String,
    /// `2023-11-10-12Z`
    pub hour_stamp: String,
    /// `2023-11-10`
    pub day_stamp: String,
    /// `Nov 10, 2023 - 12Z`, or a `from ... to ...` span for async requests
    pub label: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DisplayStamps {
    fn new(reference: DateTime<Utc>, label: String) -> Self {
        Self {
            stamp: reference.format("%Y-%m-%d-%H%MZ").to_string(),
            hour_stamp: reference.format("%Y-%m-%d-%HZ").to_string(),
            day_stamp: reference.format("%Y-%m-%d").to_string(),
            label,
            year: reference.format("%Y").to_string(),
            month: reference.format("%m").to_string(),
            day: reference.format("%d").to_string(),
        }
    }

    /// Archive directory for this request, `YYYY/MM/DD`.
    pub fn partition_path(&self) -> String {
        format!("{}/{}/{}", self.year, self.month, self.day)
    }
}

/// Human-readable label: `Nov 10, 2023 - 12Z` or `Nov 10, 2023 - 16:30Z`.
pub fn human_label(at: DateTime<Utc>) -> String {
    let time = if at.minute() == 0 {
        format!("{}Z", at.hour())
    } else {
        format!("{}:{:02}Z", at.hour(), at.minute())
    };
    format!("{} {}, {} - {}", at.format("%b"), at.day(), at.year(), time)
}

fn serialize_seconds<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(d.num_seconds())
}

/// Immutable result of aligning one request.
#[derive(Debug, Clone, Serialize)]
pub struct TemporalDescriptor {
    category: AlignmentCategory,
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    primary_cadence: Option<CadenceClass>,
    reference_time: DateTime<Utc>,
    boundaries: BTreeMap<CadenceClass, DateTime<Utc>>,
    outlooks: BTreeMap<OutlookClass, DateTime<Utc>>,
    #[serde(rename = "recentness_secs", serialize_with = "serialize_seconds")]
    recentness: Duration,
    recency: RecencyFlags,
    stamps: DisplayStamps,
    warnings: Vec<CoverageWarning>,
}

impl TemporalDescriptor {
    pub fn category(&self) -> AlignmentCategory {
        self.category
    }

    /// The raw instant the request was made for.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn primary_cadence(&self) -> Option<CadenceClass> {
        self.primary_cadence
    }

    /// Time used for titles and filenames: the primary boundary, or the raw
    /// instant for raw requests.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Time a layer of `cadence` must be fetched at.
    ///
    /// Sync and near requests give every requested cadence the shared primary
    /// boundary; async requests give each its own.
    pub fn boundary(&self, cadence: CadenceClass) -> Option<DateTime<Utc>> {
        self.boundaries.get(&cadence).copied()
    }

    /// Time a layer of `cadence` is fetched at: the raw instant for raw
    /// requests, otherwise its boundary. `None` for cadences not requested.
    pub fn reference_for(&self, cadence: CadenceClass) -> Option<DateTime<Utc>> {
        match self.category {
            AlignmentCategory::Raw => Some(self.instant),
            _ => self.boundary(cadence),
        }
    }

    pub fn boundaries(&self) -> &BTreeMap<CadenceClass, DateTime<Utc>> {
        &self.boundaries
    }

    pub fn outlook(&self, class: OutlookClass) -> Option<DateTime<Utc>> {
        self.outlooks.get(&class).copied()
    }

    pub fn outlooks(&self) -> &BTreeMap<OutlookClass, DateTime<Utc>> {
        &self.outlooks
    }

    /// `now` minus the primary reference timestamp.
    pub fn recentness(&self) -> Duration {
        self.recentness
    }

    pub fn recency(&self) -> RecencyFlags {
        self.recency
    }

    pub fn stamps(&self) -> &DisplayStamps {
        &self.stamps
    }

    pub fn warnings(&self) -> &[CoverageWarning] {
        &self.warnings
    }

    /// Map title: `<label> - <parts> - <category suffix>`.
    pub fn title(&self, parts: &[&str]) -> String {
        format!(
            "{} - {} - {}",
            self.stamps.label,
            parts.join(", "),
            self.category.title_suffix()
        )
    }
}

/// Builds descriptors under one alignment configuration.
#[derive(Debug, Clone, Default)]
pub struct TemporalEngine {
    resolver: BoundaryResolver,
    coverage: CoverageLimits,
}

impl TemporalEngine {
    /// Engine for a checked configuration.
    pub fn new(config: &AlignmentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            resolver: BoundaryResolver::new(config.lags)?,
            coverage: config.coverage,
        })
    }

    pub fn resolver(&self) -> &BoundaryResolver {
        &self.resolver
    }

    pub fn coverage(&self) -> &CoverageLimits {
        &self.coverage
    }

    /// Resolve an operator-entered time against `now`, then build.
    pub fn build_raw<I>(
        &self,
        raw: &RawInstant,
        now: DateTime<Utc>,
        mode: AlignmentMode,
        policy: OutlookPolicy,
        codes: I,
    ) -> TimeResult<TemporalDescriptor>
    where
        I: IntoIterator<Item = ProductCode>,
    {
        let instant = raw.resolve(now)?;
        self.build(instant, now, mode, policy, codes)
    }

    /// Align `instant` for the products identified by `codes`.
    pub fn build<I>(
        &self,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
        mode: AlignmentMode,
        policy: OutlookPolicy,
        codes: I,
    ) -> TimeResult<TemporalDescriptor>
    where
        I: IntoIterator<Item = ProductCode>,
    {
        let warnings = validation::check(instant, now, &self.coverage)?;
        let classification = classify(codes);
        let primary = classification.primary();

        let (category, boundaries) = match (mode, primary) {
            (AlignmentMode::Raw, Some(cadence)) => return Err(TimeError::RawWithCadence(cadence)),
            (AlignmentMode::Raw, None) => (AlignmentCategory::Raw, BTreeMap::new()),
            (_, None) => return Err(TimeError::NoCadence(mode)),
            (AlignmentMode::Sync | AlignmentMode::Near, Some(cadence)) => {
                let shared = self.resolver.resolve(cadence, instant, now);
                let category = if mode == AlignmentMode::Sync {
                    AlignmentCategory::Sync
                } else {
                    AlignmentCategory::Near
                };
                let boundaries = classification
                    .cadences
                    .iter()
                    .map(|&c| (c, shared))
                    .collect();
                (category, boundaries)
            }
            (AlignmentMode::Async, Some(cadence)) => (
                AlignmentCategory::Async(cadence),
                self.resolver
                    .resolve_all(&classification.cadences, instant, now),
            ),
        };

        let outlooks: BTreeMap<OutlookClass, DateTime<Utc>> = classification
            .outlooks
            .iter()
            .map(|&class| (class, resolve_outlook(class, instant, now, policy)))
            .collect();

        let reference_time = primary
            .and_then(|cadence| boundaries.get(&cadence).copied())
            .unwrap_or(instant);

        let recentness_base = match primary {
            Some(_) => reference_time,
            None => outlooks.values().min().copied().unwrap_or(instant),
        };
        let recentness = now - recentness_base;
        if recentness < Duration::zero() {
            return Err(TimeError::FutureInstant {
                instant: recentness_base,
                now,
            });
        }

        let shifted = |cadence| self.resolver.is_shifted(cadence, instant, now);
        let recency = RecencyFlags {
            within_twelve_hour_lag: shifted(CadenceClass::TwelveHour),
            within_six_hour_lag: shifted(CadenceClass::SixHour),
        };

        let label = match category {
            AlignmentCategory::Async(_) => format!(
                "from {} to {}",
                human_label(reference_time),
                human_label(instant)
            ),
            _ => human_label(reference_time),
        };
        let stamps = DisplayStamps::new(reference_time, label);

        for (cadence, at) in &boundaries {
            debug!(cadence = %cadence, boundary = %at, "Resolved cadence boundary");
        }
        for (class, at) in &outlooks {
            debug!(outlook = %class, issuance = %at, "Resolved outlook issuance");
        }
        info!(
            category = %category,
            reference = %stamps.stamp,
            recentness_mins = recentness.num_minutes(),
            warnings = warnings.len(),
            "Built temporal descriptor"
        );

        Ok(TemporalDescriptor {
            category,
            instant,
            now,
            primary_cadence: primary,
            reference_time,
            boundaries,
            outlooks,
            recentness,
            recency,
            stamps,
            warnings,
        })
    }
}
