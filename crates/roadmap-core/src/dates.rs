//! Calendar date helpers
//!
//! The storage layer writes dates either as `YYYY-MM-DD` or as full
//! timestamps. Everything in the engine works on whole local days, so the
//! time of day is dropped on the way in.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::DataError;

/// Parse a calendar date, truncating any time-of-day component
pub fn parse_date(input: &str) -> Result<NaiveDate, DataError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    Err(DataError::InvalidDate(input.to_string()))
}

/// Signed number of whole days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `deserialize_with` adapter for required date fields
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// `deserialize_with` adapter for optional date fields; empty strings are `None`
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_date(&raw).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_date("2025-03-09").unwrap(), date(2025, 3, 9));
        assert_eq!(parse_date(" 2025-03-09 ").unwrap(), date(2025, 3, 9));
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(parse_date("2025-03-09T00:00:00Z").unwrap(), date(2025, 3, 9));
        assert_eq!(parse_date("2025-03-09T17:30:00+02:00").unwrap(), date(2025, 3, 9));
        assert_eq!(parse_date("2025-03-09T23:59:59.999").unwrap(), date(2025, 3, 9));
        assert_eq!(parse_date("2025-03-09 08:15:00").unwrap(), date(2025, 3, 9));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_date("09/03/2025"), Err(DataError::InvalidDate(_))));
        assert!(parse_date("").is_err());
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2025, 1, 1), date(2025, 1, 31)), 30);
        assert_eq!(days_between(date(2025, 1, 31), date(2025, 1, 1)), -30);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }
}
