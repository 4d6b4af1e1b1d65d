//! ICS date and date-time normalization.
//!
//! Producers emit several incompatible encodings for `DTSTART`/`DTEND`:
//!
//! - `DTSTART;VALUE=DATE:20250415` (all-day)
//! - `DTSTART:20250415T130000Z` (UTC)
//! - `DTSTART;TZID=America/Chicago:20250415T080000` (zoned wall clock)
//! - `DTSTART:20250415T080000` (floating)
//! - `DTSTART:20250415` (bare date)
//!
//! All of them are normalized to a UTC instant. Time zones are not resolved:
//! zoned and floating values are taken as UTC wall-clock values, and dates map
//! to midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;
use tracing::trace;

/// Why a timestamp could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The value was empty.
    #[error("empty timestamp")]
    Empty,

    /// The date part is malformed or out of range.
    #[error("invalid date in {value:?}")]
    InvalidDate { value: String },

    /// The time part is malformed or out of range.
    #[error("invalid time in {value:?}")]
    InvalidTime { value: String },

    /// The value matches none of the known shapes.
    #[error("unrecognized timestamp format: {value:?}")]
    Unrecognized { value: String },
}

impl TimestampError {
    /// Short machine-readable reason code, for log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidTime { .. } => "invalid_time",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }

    fn invalid_date(value: &str) -> Self {
        Self::InvalidDate {
            value: value.to_string(),
        }
    }

    fn invalid_time(value: &str) -> Self {
        Self::InvalidTime {
            value: value.to_string(),
        }
    }

    fn unrecognized(value: &str) -> Self {
        Self::Unrecognized {
            value: value.to_string(),
        }
    }
}

/// Parses a timestamp that may carry its property parameters as a prefix.
///
/// Accepts `VALUE=DATE:20250415`, `TZID=Europe/Paris:20250415T090000` and
/// plain values such as `20250415T130000Z`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let raw = raw.trim();
    if let Some((params, value)) = raw.split_once(':')
        && params.contains('=')
    {
        return normalize_timestamp(params, value);
    }
    normalize_timestamp("", raw)
}

/// Normalizes a property value given its `;`-separated parameter list.
///
/// `params` is the text between the property name and the value colon, without
/// the leading `;` (e.g. `TZID=America/Chicago` or `VALUE=DATE`).
pub fn normalize_timestamp(params: &str, value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    let params = DateParams::parse(params);
    if let Some(tzid) = params.tzid {
        trace!(tzid, value, "Ignoring TZID, using wall-clock value");
    }

    if params.date_only {
        return parse_basic_date(value, value).map(midnight);
    }

    // Extended ISO-8601 (2025-04-15T13:00:00Z). Basic ICS values never
    // contain a dash.
    if value.contains('-') {
        return parse_extended(value);
    }

    if let Some(utc) = value.strip_suffix(['Z', 'z']) {
        let (date, time) = utc
            .split_once('T')
            .ok_or_else(|| TimestampError::unrecognized(value))?;
        if time.len() != 6 {
            return Err(TimestampError::invalid_time(value));
        }
        return Ok(NaiveDateTime::new(
            parse_basic_date(date, value)?,
            parse_basic_time(time, value)?,
        )
        .and_utc());
    }

    if let Some((date, time)) = value.split_once('T') {
        return Ok(NaiveDateTime::new(
            parse_basic_date(date, value)?,
            parse_basic_time(time, value)?,
        )
        .and_utc());
    }

    if value.len() == 8 {
        return parse_basic_date(value, value).map(midnight);
    }

    Err(TimestampError::unrecognized(value))
}

/// The parameters that affect date interpretation.
#[derive(Debug, Default)]
struct DateParams<'a> {
    date_only: bool,
    tzid: Option<&'a str>,
}

impl<'a> DateParams<'a> {
    fn parse(params: &'a str) -> Self {
        let mut parsed = Self::default();
        for param in params.split(';') {
            let Some((name, val)) = param.split_once('=') else {
                continue;
            };
            if name.trim().eq_ignore_ascii_case("VALUE") {
                parsed.date_only = val.trim().eq_ignore_ascii_case("DATE");
            } else if name.trim().eq_ignore_ascii_case("TZID") {
                parsed.tzid = Some(val.trim_matches('"'));
            }
        }
        parsed
    }
}

/// Parses `YYYYMMDD`.
fn parse_basic_date(date: &str, value: &str) -> Result<NaiveDate, TimestampError> {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::invalid_date(value));
    }
    let year = digits(&date[0..4]);
    let month = digits(&date[4..6]);
    let day = digits(&date[6..8]);
    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| TimestampError::invalid_date(value))
}

/// Parses `HHMMSS`; missing trailing components default to zero.
fn parse_basic_time(time: &str, value: &str) -> Result<NaiveTime, TimestampError> {
    if !time.is_ascii() {
        return Err(TimestampError::invalid_time(value));
    }
    let component = |range: std::ops::Range<usize>| -> Result<u32, TimestampError> {
        match time.get(range) {
            Some(part) if part.bytes().all(|b| b.is_ascii_digit()) => Ok(digits(part)),
            Some(_) => Err(TimestampError::invalid_time(value)),
            None => Ok(0),
        }
    };
    let hour = component(0..2)?;
    let minute = component(2..4)?;
    let second = component(4..6)?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| TimestampError::invalid_time(value))
}

fn parse_extended(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(midnight(date));
    }
    Err(TimestampError::unrecognized(value))
}

/// Numeric value of an all-digit ASCII string.
fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    NaiveDateTime::new(date, NaiveTime::MIN).and_utc()
}
