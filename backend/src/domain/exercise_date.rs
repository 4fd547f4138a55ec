//! Parsing and formatting of exercise dates.
//!
//! Dates arrive as free-form text (request bodies and query strings) and are
//! stored as UTC instants. Log responses render them as `Wed May 10 2023`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// `strftime` pattern used when rendering exercise dates.
pub const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

const DAY_FORMATS: [&str; 2] = ["%Y-%m-%d", LOG_DATE_FORMAT];
const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Input text that is not a recognised date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date: {value}")]
pub struct DateParseError {
    value: String,
}

impl DateParseError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// A parsed date, either a whole calendar day or a precise instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// Calendar day without a time component, interpreted in UTC.
    Day(NaiveDate),
    /// Timestamp with a time component.
    Instant(DateTime<Utc>),
}

impl DateInput {
    /// Parse user-supplied date text.
    ///
    /// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`
    /// (read as UTC) and the rendered log format.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use exercise_tracker::domain::DateInput;
    ///
    /// let parsed = DateInput::parse("2023-05-10").expect("valid date");
    /// assert_eq!(
    ///     parsed,
    ///     DateInput::Day(NaiveDate::from_ymd_opt(2023, 5, 10).expect("valid day"))
    /// );
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        let text = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::Instant(instant.with_timezone(&Utc)));
        }
        if let Some(day) = DAY_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        {
            return Ok(Self::Day(day));
        }
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| Self::Instant(Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| DateParseError {
                value: raw.to_owned(),
            })
    }

    /// First instant covered by the input: midnight for a calendar day.
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            Self::Day(day) => Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
            Self::Instant(instant) => *instant,
        }
    }

    /// Last instant covered by the input: the final microsecond of a
    /// calendar day, which is the storage resolution of timestamps.
    pub fn end_inclusive(&self) -> DateTime<Utc> {
        match self {
            Self::Day(day) => day
                .and_hms_micro_opt(23, 59, 59, 999_999)
                .map_or_else(|| self.start(), |naive| Utc.from_utc_datetime(&naive)),
            Self::Instant(instant) => *instant,
        }
    }
}

/// Render an exercise date for API responses.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use exercise_tracker::domain::format_log_date;
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().expect("valid date");
/// assert_eq!(format_log_date(&date), "Mon Jan 01 2024");
/// ```
pub fn format_log_date(date: &DateTime<Utc>) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}
