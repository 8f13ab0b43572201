//! Label command for rendering an event's display date.

use std::io::Write;

use anyhow::Result;
use chrono::FixedOffset;
use termweek_core::{CalendarConfig, display_label};

use super::util::parse_timestamp;

/// Prints the display label for an event running from `start` to `end`.
pub fn run<W: Write>(
    writer: &mut W,
    calendar: &CalendarConfig,
    offset: FixedOffset,
    start: &str,
    end: &str,
) -> Result<()> {
    let start = parse_timestamp(start, "start")?;
    let end = parse_timestamp(end, "end")?;
    writeln!(writer, "{}", display_label(calendar, start, end, offset)?)?;
    Ok(())
}
