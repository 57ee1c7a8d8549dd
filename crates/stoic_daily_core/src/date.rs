//! Date keys and date parsing.
//!
//! A [`DateKey`] is the `(year, month, day)` triple every note identifier is
//! derived from. It is computed from the [`Clock`](crate::clock::Clock) on each
//! pass and never stored.
//!
//! # Identifiers
//!
//! - [`DateKey::day_id()`]: `YYYYMMDD`, zero-padded (`20240307`)
//! - [`DateKey::month_id()`]: full English month name and year (`March2024`)
//! - [`DateKey::year_id()`]: `YYYY` (`2024`)
//!
//! # Supported Date Formats for [`parse_date()`]
//!
//! - **Relative**: `"today"`, `"yesterday"`, `"3 days ago"`
//! - **Named days**: `"last friday"`, `"next monday"`
//! - **ISO 8601**: `"2024-01-15"`

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use chrono_english::{Dialect, parse_date_string};

use crate::error::{Result, StoicError};

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar date a set of notes is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    /// Full year, e.g. 2024
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
}

impl DateKey {
    /// Build a key, returning `None` for a date that does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// Day identifier: `YYYYMMDD`.
    pub fn day_id(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Month identifier: month name followed by the unpadded year.
    pub fn month_id(&self) -> String {
        format!("{}{}", self.month_name(), self.year)
    }

    /// Year identifier: `YYYY`.
    pub fn year_id(&self) -> String {
        self.year.to_string()
    }

    /// Full English month name.
    pub fn month_name(&self) -> &'static str {
        // month is 1..=12 by construction from NaiveDate
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parse a date string into a NaiveDate
/// Supports natural language dates via chrono-english:
/// - "today", "yesterday", "tomorrow"
/// - "3 days ago", "in 5 days"
/// - "last friday", "next monday"
/// - "YYYY-MM-DD" format
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let now = Local::now();

    // First try parsing as YYYY-MM-DD for exact dates
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_date_string(date_str, now, Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|_| StoicError::InvalidDateFormat(date_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_identifiers_for_march_seventh() {
        let k = key(2024, 3, 7);
        assert_eq!(k.day_id(), "20240307");
        assert_eq!(k.month_id(), "March2024");
        assert_eq!(k.year_id(), "2024");
    }

    #[test]
    fn test_day_id_pads_month_and_day() {
        assert_eq!(key(2025, 1, 1).day_id(), "20250101");
        assert_eq!(key(2025, 12, 31).day_id(), "20251231");
    }

    #[test]
    fn test_month_names_cover_the_year() {
        assert_eq!(key(2024, 1, 15).month_name(), "January");
        assert_eq!(key(2024, 12, 15).month_name(), "December");
    }

    #[test]
    fn test_from_ymd_rejects_impossible_dates() {
        assert!(DateKey::from_ymd(2023, 2, 29).is_none());
        assert!(DateKey::from_ymd(2024, 2, 29).is_some());
        assert!(DateKey::from_ymd(2024, 13, 1).is_none());
    }

    #[test]
    fn test_display_is_iso() {
        assert_eq!(key(2024, 3, 7).to_string(), "2024-03-07");
    }

    #[test]
    fn test_parse_date_iso_format() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(
            parse_date("not a date"),
            Err(StoicError::InvalidDateFormat(_))
        ));
    }
}
