//! Product cadence classes and the product code classifier.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outlook::OutlookClass;

/// Integer tag attached to a requested layer by its product module.
pub type ProductCode = i32;

/// Native publication granularity of a non-outlook product.
///
/// Ordering is finest first, so the minimum of any set is the class that
/// must be used as the shared reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceClass {
    /// Every hour (satellite scans)
    Hourly,
    /// 00, 03, ..., 21Z (surface observations)
    ThreeHour,
    /// 00, 06, 12, 18Z (gridded model runs)
    SixHour,
    /// 00, 12Z (upper-air soundings)
    TwelveHour,
    /// 00Z
    Daily,
}

impl CadenceClass {
    /// Spacing between consecutive boundaries.
    pub fn interval_hours(&self) -> u32 {
        match self {
            CadenceClass::Hourly => 1,
            CadenceClass::ThreeHour => 3,
            CadenceClass::SixHour => 6,
            CadenceClass::TwelveHour => 12,
            CadenceClass::Daily => 24,
        }
    }

    pub fn all() -> &'static [CadenceClass] {
        &[
            CadenceClass::Hourly,
            CadenceClass::ThreeHour,
            CadenceClass::SixHour,
            CadenceClass::TwelveHour,
            CadenceClass::Daily,
        ]
    }
}

impl fmt::Display for CadenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CadenceClass::Hourly => "hourly",
            CadenceClass::ThreeHour => "three-hour",
            CadenceClass::SixHour => "six-hour",
            CadenceClass::TwelveHour => "twelve-hour",
            CadenceClass::Daily => "daily",
        };
        f.write_str(name)
    }
}

/// What a single product code resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductClass {
    Cadence(CadenceClass),
    Outlook(OutlookClass),
}

/// Static code table. A code appears at most once.
///
/// Codes 14 (watches), 15 (storm reports) and -1 (modifiers) are not time
/// sensitive and are intentionally absent.
const PRODUCT_TABLE: &[(ProductCode, ProductClass)] = &[
    (8, ProductClass::Cadence(CadenceClass::Hourly)),
    (0, ProductClass::Cadence(CadenceClass::ThreeHour)),
    (1, ProductClass::Cadence(CadenceClass::ThreeHour)),
    (3, ProductClass::Cadence(CadenceClass::SixHour)),
    (4, ProductClass::Cadence(CadenceClass::SixHour)),
    (5, ProductClass::Cadence(CadenceClass::SixHour)),
    (6, ProductClass::Cadence(CadenceClass::SixHour)),
    (7, ProductClass::Cadence(CadenceClass::SixHour)),
    (2, ProductClass::Cadence(CadenceClass::TwelveHour)),
    (13, ProductClass::Cadence(CadenceClass::TwelveHour)),
    (9, ProductClass::Outlook(OutlookClass::Day1)),
    (10, ProductClass::Outlook(OutlookClass::Day2)),
    (11, ProductClass::Outlook(OutlookClass::Day3)),
    (12, ProductClass::Outlook(OutlookClass::Day4Plus)),
];

/// Look up a single product code.
pub fn product_class(code: ProductCode) -> Option<ProductClass> {
    PRODUCT_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, class)| *class)
}

/// Result of classifying a request's product codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Every cadence class implied by the codes.
    pub cadences: BTreeSet<CadenceClass>,
    /// Every outlook class implied by the codes.
    pub outlooks: BTreeSet<OutlookClass>,
}

impl Classification {
    /// The finest requested cadence, if any.
    pub fn primary(&self) -> Option<CadenceClass> {
        self.cadences.iter().next().copied()
    }
}

/// Classify a set of product codes. Unknown codes are ignored.
pub fn classify<I>(codes: I) -> Classification
where
    I: IntoIterator<Item = ProductCode>,
{
    let mut classification = Classification::default();
    for code in codes {
        match product_class(code) {
            Some(ProductClass::Cadence(c)) => {
                classification.cadences.insert(c);
            }
            Some(ProductClass::Outlook(o)) => {
                classification.outlooks.insert(o);
            }
            None => {}
        }
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finest_cadence_wins() {
        let c = classify([3, 0, 2]);
        assert_eq!(c.primary(), Some(CadenceClass::ThreeHour));
        assert_eq!(c.cadences.len(), 3);
    }

    #[test]
    fn test_outlook_only_has_no_primary() {
        let c = classify([9, 10, 14, -1]);
        assert_eq!(c.primary(), None);
        assert!(c.outlooks.contains(&OutlookClass::Day1));
        assert!(c.outlooks.contains(&OutlookClass::Day2));
    }

    #[test]
    fn test_table_codes_are_unique() {
        let mut seen = BTreeSet::new();
        for (code, _) in PRODUCT_TABLE {
            assert!(seen.insert(*code), "duplicate code {code}");
        }
    }
}
