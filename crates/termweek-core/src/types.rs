//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by calendar operations.
///
/// A date that falls outside every term is not an error; lookups report it
/// as `None` or [`WeekNumber::OUT_OF_TERM`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A value was missing, malformed, or not representable.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A named item does not exist in the active configuration.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A start bound is later than its end bound.
    #[error("{field} starts at {start} which is after its end {end}")]
    InvalidRange {
        field: &'static str,
        start: String,
        end: String,
    },
}

impl CalendarError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: &'static str, start: impl fmt::Display, end: impl fmt::Display) -> Self {
        Self::InvalidRange {
            field,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Shorthand for results in this crate.
pub type Result<T, E = CalendarError> = std::result::Result<T, E>;

/// An instant on the timeline, normalized to UTC.
///
/// Every timestamp entering the engine passes through [`Timestamp::parse`],
/// so term-boundary comparisons never see a local offset. Accepted forms:
///
/// - RFC 3339 with any offset: `2015-02-18T10:00:00.000Z`, `2014-10-07T11:00:00+01:00`
/// - a naive date-time, read as UTC: `2015-02-18T10:00:00`
/// - a bare date, read as midnight UTC: `2015-02-18`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parses a timestamp string, rejecting empty and malformed input.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CalendarError::invalid("timestamp", "value is empty"));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        Err(CalendarError::invalid(
            "timestamp",
            format!("{s:?} is not an ISO 8601 date or timestamp"),
        ))
    }

    /// Wraps an existing UTC instant.
    #[must_use]
    pub const fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Midnight UTC at the start of `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Builds a timestamp from milliseconds since the Unix epoch.
    pub fn from_unix_millis(millis: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| CalendarError::invalid("timestamp", format!("{millis} ms is out of range")))
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The underlying UTC instant.
    #[must_use]
    pub const fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// The calendar date of this instant in UTC.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Offsets the instant by `delta`, failing if the result is not representable.
    pub fn checked_add(self, delta: chrono::Duration) -> Result<Self> {
        self.0
            .checked_add_signed(delta)
            .map(Self)
            .ok_or_else(|| CalendarError::invalid("timestamp", format!("{self} + {delta} overflows")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for NaiveDate {
    fn from(ts: Timestamp) -> Self {
        ts.date()
    }
}

/// A 1-based week of term, or the out-of-term sentinel `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekNumber(u32);

impl WeekNumber {
    /// The sentinel for dates outside every term.
    pub const OUT_OF_TERM: Self = Self(0);

    /// Wraps a raw week number; `0` means out of term.
    #[must_use]
    pub const fn new(week: u32) -> Self {
        Self(week)
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_out_of_term(self) -> bool {
        self.0 == 0
    }
}

/// Renders the short indicator used in labels: `W5`, or `OT` out of term.
impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_out_of_term() {
            write!(f, "OT")
        } else {
            write!(f, "W{}", self.0)
        }
    }
}

impl From<WeekNumber> for u32 {
    fn from(week: WeekNumber) -> Self {
        week.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn timestamp_parses_rfc3339_and_normalizes_to_utc() {
        let ts = Timestamp::parse("2014-10-07T11:00:00+01:00").unwrap();
        assert_eq!(ts.as_utc(), Utc.with_ymd_and_hms(2014, 10, 7, 10, 0, 0).unwrap());
        assert_eq!(ts.to_string(), "2014-10-07T10:00:00Z");
    }

    #[test]
    fn timestamp_parses_fractional_seconds() {
        let ts = Timestamp::parse("2015-02-18T10:00:00.000Z").unwrap();
        assert_eq!(ts.as_utc(), Utc.with_ymd_and_hms(2015, 2, 18, 10, 0, 0).unwrap());
    }

    #[test]
    fn timestamp_parses_bare_date_as_midnight_utc() {
        let ts = Timestamp::parse("2015-01-14").unwrap();
        assert_eq!(ts.as_utc(), Utc.with_ymd_and_hms(2015, 1, 14, 0, 0, 0).unwrap());
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2015, 1, 14).unwrap());
    }

    #[test]
    fn timestamp_parses_naive_datetime_as_utc() {
        let ts = Timestamp::parse("2015-01-14T09:15:00").unwrap();
        assert_eq!(ts.as_utc(), Utc.with_ymd_and_hms(2015, 1, 14, 9, 15, 0).unwrap());
    }

    #[test]
    fn timestamp_rejects_empty_and_garbage() {
        assert!(matches!(
            Timestamp::parse(""),
            Err(CalendarError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Timestamp::parse("   "),
            Err(CalendarError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Timestamp::parse("invalid_start_date"),
            Err(CalendarError::InvalidArgument { .. })
        ));
        assert!(Timestamp::parse("2015-04-21T:14:00.000Z").is_err());
    }

    #[test]
    fn timestamp_unix_millis_roundtrip() {
        let ts = Timestamp::parse("2015-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.unix_millis(), 1_420_070_400_000);
        assert_eq!(Timestamp::from_unix_millis(1_420_070_400_000).unwrap(), ts);
        assert!(Timestamp::from_unix_millis(i64::MAX).is_err());
    }

    #[test]
    fn timestamp_serde_uses_rfc3339_strings() {
        let ts: Timestamp = serde_json::from_str("\"2015-02-18T10:00:00.000Z\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2015-02-18T10:00:00Z\"");

        let result: Result<Timestamp, _> = serde_json::from_str("\"not a date\"");
        assert!(result.is_err());
    }

    #[test]
    fn week_number_display() {
        assert_eq!(WeekNumber::new(5).to_string(), "W5");
        assert_eq!(WeekNumber::OUT_OF_TERM.to_string(), "OT");
        assert!(WeekNumber::new(0).is_out_of_term());
        assert!(!WeekNumber::new(1).is_out_of_term());
    }

    #[test]
    fn calendar_error_messages() {
        let err = CalendarError::NotFound {
            kind: "term",
            name: "trinity".into(),
        };
        assert_eq!(err.to_string(), "term not found: trinity");

        let err = CalendarError::range("event", "2015-01-02", "2015-01-01");
        assert_eq!(
            err.to_string(),
            "event starts at 2015-01-02 which is after its end 2015-01-01"
        );
    }
}
