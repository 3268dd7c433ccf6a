//! Operator-entered times.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::error::InstantParseError;

/// A point in time as entered by the operator, before alignment.
///
/// Accepted forms:
/// - `recent` (or `current`): the current time
/// - `today, H[, M]`: today at the given UTC hour
/// - `Y, M, D, H[, M]`: an explicit calendar point
/// - ISO 8601: `2023-11-10T14:05:00Z`, `2023-11-10T14:05:00`, `2023-11-10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInstant {
    MostRecent,
    Today { hour: u32, minute: u32 },
    At(DateTime<Utc>),
}

impl RawInstant {
    pub fn parse(s: &str) -> Result<Self, InstantParseError> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        if lower == "recent" || lower == "current" {
            return Ok(RawInstant::MostRecent);
        }

        if trimmed.contains(',') {
            let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            if parts[0].eq_ignore_ascii_case("today") {
                return parse_today(&parts[1..], trimmed);
            }
            return parse_calendar(&parts, trimmed);
        }

        from_iso8601(trimmed).map(RawInstant::At)
    }

    /// The concrete instant, using `now` for the relative forms.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, InstantParseError> {
        match *self {
            RawInstant::MostRecent => Ok(now),
            RawInstant::Today { hour, minute } => Utc
                .with_ymd_and_hms(now.year(), now.month(), now.day(), hour, minute, 0)
                .single()
                .ok_or_else(|| InstantParseError::NonexistentTime(self.to_string())),
            RawInstant::At(at) => Ok(at),
        }
    }
}

impl FromStr for RawInstant {
    type Err = InstantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RawInstant::parse(s)
    }
}

impl fmt::Display for RawInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInstant::MostRecent => f.write_str("recent"),
            RawInstant::Today { hour, minute: 0 } => write!(f, "today, {hour}"),
            RawInstant::Today { hour, minute } => write!(f, "today, {hour}, {minute}"),
            RawInstant::At(at) => {
                write!(f, "{}, {}, {}, {}", at.year(), at.month(), at.day(), at.hour())?;
                if at.minute() != 0 {
                    write!(f, ", {}", at.minute())?;
                }
                Ok(())
            }
        }
    }
}

fn parse_field(value: &str, field: &'static str) -> Result<u32, InstantParseError> {
    value.parse().map_err(|_| InstantParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_today(parts: &[&str], original: &str) -> Result<RawInstant, InstantParseError> {
    let (hour, minute) = match parts {
        [h] => (parse_field(h, "hour")?, 0),
        [h, m] => (parse_field(h, "hour")?, parse_field(m, "minute")?),
        _ => return Err(InstantParseError::InvalidFormat(original.to_string())),
    };
    if hour > 23 || minute > 59 {
        return Err(InstantParseError::NonexistentTime(original.to_string()));
    }
    Ok(RawInstant::Today { hour, minute })
}

fn parse_calendar(parts: &[&str], original: &str) -> Result<RawInstant, InstantParseError> {
    let (y, mo, d, h, mi) = match parts {
        [y, mo, d, h] => (*y, *mo, *d, *h, "0"),
        [y, mo, d, h, mi] => (*y, *mo, *d, *h, *mi),
        _ => return Err(InstantParseError::InvalidFormat(original.to_string())),
    };
    let year: i32 = y.parse().map_err(|_| InstantParseError::InvalidField {
        field: "year",
        value: y.to_string(),
    })?;

    Utc.with_ymd_and_hms(
        year,
        parse_field(mo, "month")?,
        parse_field(d, "day")?,
        parse_field(h, "hour")?,
        parse_field(mi, "minute")?,
        0,
    )
    .single()
    .map(RawInstant::At)
    .ok_or_else(|| InstantParseError::NonexistentTime(original.to_string()))
}

/// Layouts accepted without an offset; all are read as UTC.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse an ISO 8601 timestamp. Missing offsets are UTC and a bare date is
/// midnight.
pub fn from_iso8601(s: &str) -> Result<DateTime<Utc>, InstantParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::default()))
        })
        .map(|ndt| Utc.from_utc_datetime(&ndt))
        .ok_or_else(|| InstantParseError::InvalidFormat(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_recent() {
        assert_eq!(RawInstant::parse("recent").unwrap(), RawInstant::MostRecent);
        assert_eq!(RawInstant::parse(" Current ").unwrap(), RawInstant::MostRecent);
    }

    #[test]
    fn test_parse_calendar_forms() {
        assert_eq!(
            RawInstant::parse("2023, 11, 10, 14").unwrap(),
            RawInstant::At(utc(2023, 11, 10, 14, 0))
        );
        assert_eq!(
            RawInstant::parse("2023,11,10,14,5").unwrap(),
            RawInstant::At(utc(2023, 11, 10, 14, 5))
        );
    }

    #[test]
    fn test_parse_today() {
        let now = utc(2023, 11, 10, 18, 45);
        let raw = RawInstant::parse("today, 6").unwrap();
        assert_eq!(raw, RawInstant::Today { hour: 6, minute: 0 });
        assert_eq!(raw.resolve(now).unwrap(), utc(2023, 11, 10, 6, 0));
        assert!(RawInstant::parse("today, 24").is_err());
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            RawInstant::parse("2023-11-10T14:05:00Z").unwrap(),
            RawInstant::At(utc(2023, 11, 10, 14, 5))
        );
        assert_eq!(
            RawInstant::parse("2023-11-10").unwrap(),
            RawInstant::At(utc(2023, 11, 10, 0, 0))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RawInstant::parse("2023, 11"),
            Err(InstantParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            RawInstant::parse("2023, 2, 30, 0"),
            Err(InstantParseError::NonexistentTime(_))
        ));
        assert!(matches!(
            RawInstant::parse("2023, nov, 10, 0"),
            Err(InstantParseError::InvalidField { field: "month", .. })
        ));
        assert!(RawInstant::parse("yesterday").is_err());
    }

    #[test]
    fn test_display_round_trips_calendar_form() {
        let raw = RawInstant::At(utc(2023, 11, 10, 16, 30));
        assert_eq!(raw.to_string(), "2023, 11, 10, 16, 30");
        assert_eq!(RawInstant::parse(&raw.to_string()).unwrap(), raw);
        assert_eq!(RawInstant::Today { hour: 6, minute: 0 }.to_string(), "today, 6");
    }

    #[test]
    fn test_from_iso8601_without_offset() {
        assert_eq!(from_iso8601("2023-11-10T14:05").unwrap(), utc(2023, 11, 10, 14, 5));
        assert_eq!(from_iso8601("2023-11-10 14:05").unwrap(), utc(2023, 11, 10, 14, 5));
        assert_eq!(
            from_iso8601("2023-11-10T14:05:00+02:00").unwrap(),
            utc(2023, 11, 10, 12, 5)
        );
        assert!(matches!(
            from_iso8601("10/11/2023"),
            Err(InstantParseError::InvalidFormat(_))
        ));
    }
}
