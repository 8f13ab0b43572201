//! Term and week lookups: `term`, `week`, `weeks`, `date` and `first-day`.

use std::io::Write;

use anyhow::Result;
use termweek_core::{
    CalendarConfig, first_day_of_term, get_date_by_week_and_day, get_term, get_term_by_name,
    get_week_in_term, get_weeks_in_term,
};

use super::util::parse_timestamp;

/// Prints the term containing `date`, or that the date is out of term.
pub fn term<W: Write>(writer: &mut W, calendar: &CalendarConfig, date: &str) -> Result<()> {
    let date = parse_timestamp(date, "date")?.date();
    match get_term(calendar, date) {
        Some(term) => {
            let week = get_week_in_term(calendar, date);
            writeln!(
                writer,
                "{} ({}): {} to {}, week {} of {}",
                term.label,
                term.name,
                term.start,
                term.end,
                week.get(),
                get_weeks_in_term(term)
            )?;
        }
        None => writeln!(writer, "{date} is out of term")?,
    }
    Ok(())
}

/// Prints the week indicator for `date`.
pub fn week<W: Write>(writer: &mut W, calendar: &CalendarConfig, date: &str) -> Result<()> {
    let date = parse_timestamp(date, "date")?;
    writeln!(writer, "{}", get_week_in_term(calendar, date))?;
    Ok(())
}

/// Prints the number of weeks in a term.
pub fn weeks<W: Write>(writer: &mut W, calendar: &CalendarConfig, name: &str) -> Result<()> {
    let term = get_term_by_name(calendar, name)?;
    writeln!(writer, "{}", get_weeks_in_term(term))?;
    Ok(())
}

/// Prints the date for a term / week / weekday coordinate.
pub fn date<W: Write>(
    writer: &mut W,
    calendar: &CalendarConfig,
    name: &str,
    week: u32,
    day: u32,
) -> Result<()> {
    let resolved = get_date_by_week_and_day(calendar, name, week, day)?;
    writeln!(writer, "{}", resolved.format("%Y-%m-%d (%a)"))?;
    Ok(())
}

/// Prints the first day of a term.
pub fn first_day<W: Write>(writer: &mut W, calendar: &CalendarConfig, name: &str) -> Result<()> {
    let start = first_day_of_term(calendar, name)?;
    writeln!(writer, "{}", start.format("%Y-%m-%d (%a)"))?;
    Ok(())
}
