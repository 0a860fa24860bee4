//! Field parsing rules for raw incident columns.
//!
//! Raw datasets are loosely typed: ages arrive as numbers or strings, dates
//! in several formats, and the case-closed flag as a `"Yes"`/`"No"` literal.
//! The helpers here absorb all of that into the typed [`crate::Incident`]
//! fields without ever failing on a bad value. Unparsable values become
//! `None` and are handled by the fallback rules of each consumer.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

use crate::CLOSED_LITERAL;

/// Date-time layouts tried in order before falling back to date-only
/// layouts.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Parses an occurrence date string.
///
/// Accepts RFC 3339 timestamps (the wall-clock time as written is kept),
/// ISO date-times with or without fractional seconds, `YYYY-MM-DD`, and
/// the day-first `DD-MM-YYYY HH:MM` layout used by the Indian crime
/// datasets. Returns `None` for anything else.
#[must_use]
pub fn parse_occurrence_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses the leading integer of a string, ignoring anything after it.
///
/// `"25"` and `"25.7"` both yield `25`, `" -3 years"` yields `-3`, while
/// `"abc"` and `""` yield `None`.
#[must_use]
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// A raw JSON cell value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawField {
    fn into_text(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Deserializes a mandatory categorical column, stringifying non-string
/// scalars.
///
/// # Errors
///
/// Fails if the column is missing or `null`.
pub fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawField::deserialize(deserializer).map(RawField::into_text)
}

/// Deserializes an optional categorical column. Blank strings become
/// `None`; the stored value is otherwise kept verbatim.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawField>::deserialize(deserializer)?
        .map(RawField::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// Deserializes a victim age. Numbers are truncated, strings go through
/// [`parse_leading_int`], anything else is treated as missing.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn optional_age<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Int(i)) => Some(i),
        #[allow(clippy::cast_possible_truncation)]
        Some(RawField::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(RawField::Text(s)) => parse_leading_int(&s),
        _ => None,
    })
}

/// Deserializes an occurrence date. Strings go through
/// [`parse_occurrence_date`]; integers are read as epoch milliseconds.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Text(s)) => parse_occurrence_date(&s),
        Some(RawField::Int(ms)) => DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc()),
        _ => None,
    })
}

/// Deserializes the case-closed flag. Only the literal `"Yes"` counts as
/// closed.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn closed_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Text(s)) => s == CLOSED_LITERAL,
        _ => false,
    })
}

/// Serializes the case-closed flag back to its `"Yes"`/`"No"` literal.
///
/// # Errors
///
/// Only fails if the underlying serializer fails.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn closed_literal<S>(closed: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *closed { CLOSED_LITERAL } else { "No" })
}
