//! Range command for calendar view windows.

use std::io::Write;

use anyhow::{Context, Result};
use termweek_core::{CalendarView, view_range, weeks_in_date_range};

use super::util::parse_timestamp;

/// Prints the fetch window of `view` centred on `date`.
pub fn run<W: Write>(writer: &mut W, view: &str, date: &str) -> Result<()> {
    let view: CalendarView = view.parse().context("invalid view")?;
    let date = parse_timestamp(date, "date")?;
    let (start, end) = view_range(view, date)?;
    let weeks = weeks_in_date_range(start, end)?;
    writeln!(writer, "{view}: {start} to {end} (~{weeks} weeks)")?;
    Ok(())
}
