//! Calendar-date handling for `due_date` and `done_at` fields.
//!
//! The server stores these as SQL `DATE` columns, but depending on the
//! driver they arrive either as plain `YYYY-MM-DD` strings or as full ISO
//! timestamps (`2025-03-10T00:00:00.000Z`). Parsing truncates to the
//! first ten characters and reads the date portion only; serialization
//! always emits `YYYY-MM-DD`. Time-of-day never participates in any
//! comparison.

use chrono::NaiveDate;

/// Parse a calendar date from either `YYYY-MM-DD` or a longer ISO
/// timestamp. Returns `None` for anything that does not start with a
/// valid date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Today as a calendar date in the viewer's local timezone.
///
/// Status classification and completion stamping are defined against the
/// viewer's wall clock, not UTC.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Serde adapter for optional calendar-date fields.
///
/// Use as `#[serde(with = "crate::dates::calendar_date_opt", default)]`.
/// Missing fields, `null`, and empty strings all read as `None`.
pub mod calendar_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::parse_calendar_date;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_calendar_date(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date '{s}'"))),
        }
    }
}
