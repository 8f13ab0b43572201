//! Date-range helpers used by calendar views.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::{CalendarError, Result, Timestamp};

const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Whether `date` lies within `[start, end]`, both ends inclusive.
pub fn is_date_in_range(date: Timestamp, start: Timestamp, end: Timestamp) -> Result<bool> {
    if start > end {
        return Err(CalendarError::range("date range", start, end));
    }
    Ok(start <= date && date <= end)
}

/// Number of weeks between two instants, rounded to the nearest whole week.
pub fn weeks_in_date_range(start: Timestamp, end: Timestamp) -> Result<i64> {
    if start > end {
        return Err(CalendarError::range("date range", start, end));
    }
    let seconds = (end.as_utc() - start.as_utc()).num_seconds();
    Ok((seconds + SECONDS_PER_WEEK / 2) / SECONDS_PER_WEEK)
}

/// The granularity of a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl CalendarView {
    /// How far either side of the view date events are fetched.
    pub fn span(self) -> Duration {
        match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(CalendarError::invalid(
                "calendar view",
                format!("expected day, week or month, got {s:?}"),
            )),
        }
    }
}

/// The window a calendar view loads events for: one span before and one
/// span after `date`.
pub fn view_range(view: CalendarView, date: Timestamp) -> Result<(Timestamp, Timestamp)> {
    let span = view.span();
    Ok((date.checked_add(-span)?, date.checked_add(span)?))
}
