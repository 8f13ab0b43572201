//! Buckets command for grouping timetable events by term.
//!
//! Reads an events payload (a JSON array, or the `{"results": [...]}`
//! envelope from the events API) and prints the term buckets with a display
//! label per event.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::Serialize;
use termweek_core::{
    CalendarConfig, Event, TermBucket, display_label, order_events_by_term, parse_events,
    split_events_by_term,
};

/// An event with its rendered label, for JSON output.
#[derive(Debug, Serialize)]
struct LabeledEvent<'a> {
    display: String,
    #[serde(flatten)]
    event: &'a Event,
}

/// A bucket of labeled events, for JSON output.
#[derive(Debug, Serialize)]
struct BucketOutput<'a> {
    label: &'a str,
    events: Vec<LabeledEvent<'a>>,
}

/// Loads the events payload from `file`, or from `stdin` when no file is given.
pub fn read_events<R: Read>(file: Option<&Path>, stdin: &mut R) -> Result<Vec<Event>> {
    let payload = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read events from stdin")?;
            buf
        }
    };
    parse_events(&payload).context("failed to parse events")
}

/// Groups `events` and writes the buckets.
///
/// With `split_only`, only the per-term buckets are written and
/// out-of-term events are left out.
pub fn run<W: Write>(
    writer: &mut W,
    calendar: &CalendarConfig,
    offset: FixedOffset,
    events: &[Event],
    split_only: bool,
    json: bool,
) -> Result<()> {
    let split = split_events_by_term(events, calendar);
    let buckets = if split_only {
        split.into_buckets()
    } else {
        order_events_by_term(&split, events, calendar)
    };
    tracing::debug!(buckets = buckets.len(), split_only, "grouped events");

    if json {
        let output = labeled_buckets(calendar, offset, &buckets)?;
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(writer, "{}", format_buckets(calendar, offset, &buckets)?)?;
    }
    Ok(())
}

fn labeled_buckets<'a>(
    calendar: &CalendarConfig,
    offset: FixedOffset,
    buckets: &'a [TermBucket<Event>],
) -> Result<Vec<BucketOutput<'a>>> {
    buckets
        .iter()
        .map(|bucket| -> Result<BucketOutput<'a>> {
            let events = bucket
                .events
                .iter()
                .map(|event| -> Result<LabeledEvent<'a>> {
                    Ok(LabeledEvent {
                        display: display_label(calendar, event.start, event.end, offset)?,
                        event,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(BucketOutput {
                label: &bucket.label,
                events,
            })
        })
        .collect()
}

/// Formats buckets as human-readable text.
pub fn format_buckets(
    calendar: &CalendarConfig,
    offset: FixedOffset,
    buckets: &[TermBucket<Event>],
) -> Result<String> {
    let mut output = String::new();

    if buckets.iter().all(TermBucket::is_empty) {
        writeln!(output, "No events.")?;
        return Ok(output);
    }

    for bucket in buckets {
        let noun = if bucket.len() == 1 { "event" } else { "events" };
        writeln!(output, "{} ({} {noun})", bucket.label, bucket.len())?;
        for event in &bucket.events {
            let label = display_label(calendar, event.start, event.end, offset)?;
            match event.fields.get("displayName").and_then(|v| v.as_str()) {
                Some(name) => writeln!(output, "  {label}  {name}")?,
                None => writeln!(output, "  {label}")?,
            }
        }
    }

    Ok(output)
}
