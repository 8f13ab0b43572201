//! Human-readable labels for events.
//!
//! The main entry point is [`generate_display_date`], which renders a
//! start/end pair as e.g. `W5 · Wed 10am-5:30pm`.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};

use crate::term::CalendarConfig;
use crate::types::{CalendarError, Result, Timestamp};
use crate::week::get_week_in_term;

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }
}

/// Renders an event's start and end as a compact label in UTC.
///
/// Both values are parsed with [`Timestamp::parse`]; empty or malformed input
/// fails with [`CalendarError::InvalidArgument`].
pub fn generate_display_date(config: &CalendarConfig, start: &str, end: &str) -> Result<String> {
    let start = parse_bound("start", start)?;
    let end = parse_bound("end", end)?;
    display_label(config, start, end, utc_offset())
}

/// Renders a label with clock times shown at `offset`.
///
/// Format: `<week> · <weekday> <start>[<meridiem>]-<end><meridiem>`.
///
/// - The week indicator comes from the start's UTC date: `W<n>`, or `OT`.
/// - The weekday is the **end**'s, so an event running past midnight shows
///   the day it finishes on.
/// - Times use a 12-hour clock and drop `:00`. The start's meridiem is
///   omitted when it matches the end's (`10-11:30am`, `10am-5:30pm`).
pub fn display_label(
    config: &CalendarConfig,
    start: Timestamp,
    end: Timestamp,
    offset: FixedOffset,
) -> Result<String> {
    if start > end {
        return Err(CalendarError::range("display range", start, end));
    }

    let week = get_week_in_term(config, start);
    let start_local = start.as_utc().with_timezone(&offset);
    let end_local = end.as_utc().with_timezone(&offset);

    let (start_clock, start_meridiem) = clock_time(&start_local);
    let (end_clock, end_meridiem) = clock_time(&end_local);

    let start_part = if start_meridiem == end_meridiem {
        start_clock
    } else {
        format!("{start_clock}{}", start_meridiem.as_str())
    };

    Ok(format!(
        "{week} · {} {start_part}-{end_clock}{}",
        weekday_abbrev(end_local.weekday()),
        end_meridiem.as_str()
    ))
}

/// Three-letter weekday of a timestamp in UTC (`Wed`).
pub fn day_name(ts: Timestamp) -> &'static str {
    weekday_abbrev(ts.as_utc().weekday())
}

/// Day of the month of a timestamp in UTC.
pub fn day_number(ts: Timestamp) -> u32 {
    ts.as_utc().day()
}

/// Three-letter month of a timestamp in UTC (`Feb`).
pub fn month_name(ts: Timestamp) -> &'static str {
    MONTHS[ts.as_utc().month0() as usize]
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    DAYS[weekday.num_days_from_monday() as usize]
}

fn clock_time(dt: &DateTime<FixedOffset>) -> (String, Meridiem) {
    let (is_pm, hour) = dt.hour12();
    let meridiem = if is_pm { Meridiem::Pm } else { Meridiem::Am };
    let clock = match dt.minute() {
        0 => hour.to_string(),
        minute => format!("{hour}:{minute:02}"),
    };
    (clock, meridiem)
}

fn parse_bound(field: &'static str, value: &str) -> Result<Timestamp> {
    Timestamp::parse(value).map_err(|e| match e {
        CalendarError::InvalidArgument { reason, .. } => CalendarError::InvalidArgument { field, reason },
        other => other,
    })
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}
