//! Calendar dates and their wire representation.
//!
//! Dates travel as `YYYY-MM-DD` strings. A missing date is omitted from
//! outgoing payloads, and an unreadable incoming date is treated as missing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar date used for borrowing and reservation fields.
pub type Date = NaiveDate;

/// `strftime` pattern of the wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date in wire format.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a wire date.
///
/// Accepts the plain `YYYY-MM-DD` form as well as full timestamps, from which
/// only the calendar date is kept. Returns `None` for anything else.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// `#[serde(with = "wire_date")]` adapter for `Option<Date>` fields.
pub mod wire_date {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Date, format_date, parse_date};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_date))
    }
}
