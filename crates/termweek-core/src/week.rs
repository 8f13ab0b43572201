//! Mapping between calendar dates and term / week / weekday coordinates.
//!
//! Weeks are counted from each term's first day: week 1 is the seven days
//! starting on `term.start`, week 2 the next seven, and so on. Week
//! boundaries therefore fall on whatever weekday the term starts on, not on
//! Monday. Display code relies on this, so it is policy rather than a bug.

use chrono::{Datelike, Days, Duration, NaiveDate};

use crate::term::{CalendarConfig, Term};
use crate::types::{CalendarError, Result, WeekNumber};

/// Finds the term whose inclusive `[start, end]` range contains `date`.
///
/// If terms overlap, the first match in configured order wins.
pub fn get_term(config: &CalendarConfig, date: impl Into<NaiveDate>) -> Option<&Term> {
    let date = date.into();
    config.terms().iter().find(|term| term.contains(date))
}

/// Returns the 1-based week of term for `date`, or [`WeekNumber::OUT_OF_TERM`].
pub fn get_week_in_term(config: &CalendarConfig, date: impl Into<NaiveDate>) -> WeekNumber {
    let date = date.into();
    get_term(config, date).map_or(WeekNumber::OUT_OF_TERM, |term| {
        WeekNumber::new(weeks_between(term.start, date).saturating_add(1))
    })
}

/// Number of weeks in a term, counting the partial weeks at both ends.
///
/// A hand-built term with `start` after `end` is measured by the distance
/// between its two dates.
pub fn get_weeks_in_term(term: &Term) -> u32 {
    weeks_between(term.start, term.end).saturating_add(1)
}

/// Looks up a term by its stable name.
pub fn get_term_by_name<'a>(config: &'a CalendarConfig, name: &str) -> Result<&'a Term> {
    if name.trim().is_empty() {
        return Err(CalendarError::invalid("term name", "cannot be empty"));
    }
    config
        .terms()
        .iter()
        .find(|term| term.name == name)
        .ok_or_else(|| CalendarError::NotFound {
            kind: "term",
            name: name.to_string(),
        })
}

/// The first day of the named term.
pub fn first_day_of_term(config: &CalendarConfig, name: &str) -> Result<NaiveDate> {
    get_term_by_name(config, name).map(|term| term.start)
}

/// Resolves a term name, week number and ISO weekday (`1` = Monday,
/// `7` = Sunday) to a calendar date.
///
/// The anchor is `term.start + week * 7` days, and the result is the day
/// with the requested weekday in the Monday-to-Sunday week containing that
/// anchor. Depending on the weekday the term starts on, the result lands in
/// term week `week` or `week + 1`.
pub fn get_date_by_week_and_day(
    config: &CalendarConfig,
    term_name: &str,
    week: u32,
    day: u32,
) -> Result<NaiveDate> {
    if !(1..=7).contains(&day) {
        return Err(CalendarError::invalid(
            "day",
            format!("expected 1 (Monday) to 7 (Sunday), got {day}"),
        ));
    }
    let term = get_term_by_name(config, term_name)?;

    let anchor = term
        .start
        .checked_add_days(Days::new(u64::from(week) * 7))
        .ok_or_else(|| {
            CalendarError::invalid("week", format!("week {week} of {term_name} is out of range"))
        })?;
    let offset = i64::from(day) - i64::from(anchor.weekday().number_from_monday());

    anchor
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(|| CalendarError::invalid("day", format!("day {day} of week {week} is out of range")))
}

/// Whole weeks between two dates, in either order.
fn weeks_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let weeks = (to - from).num_days().unsigned_abs() / 7;
    u32::try_from(weeks).unwrap_or(u32::MAX)
}
