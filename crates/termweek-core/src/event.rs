//! Timed events as delivered by the events API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{CalendarError, Result, Timestamp};

/// Anything with a start and end instant that can be bucketed by term.
///
/// This trait allows classification to work with different event
/// representations (e.g. [`Event`] parsed from JSON, or caller-owned records).
pub trait TimedEvent {
    /// When the event starts. Term membership is decided by this instant.
    fn start(&self) -> Timestamp;

    /// When the event ends.
    fn end(&self) -> Timestamp;
}

/// A scheduled event.
///
/// Fields other than `start` and `end` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub start: Timestamp,
    pub end: Timestamp,
    /// Any additional fields from the source payload.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// Creates an event, rejecting a start later than the end.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        let event = Self {
            start,
            end,
            fields: Map::new(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Attaches an extra field, replacing any previous value.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(CalendarError::range("event", self.start, self.end));
        }
        Ok(())
    }
}

impl TimedEvent for Event {
    fn start(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

impl<E: TimedEvent> TimedEvent for &E {
    fn start(&self) -> Timestamp {
        (*self).start()
    }

    fn end(&self) -> Timestamp {
        (*self).end()
    }
}

/// Parses an events payload.
///
/// Accepts either a bare JSON array of events or the `{"results": [...]}`
/// envelope returned by the events endpoint. Anything else is rejected as
/// not being a sequence.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CalendarError::invalid("events", format!("malformed JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CalendarError::invalid(
                    "events",
                    "expected an array or an object with a `results` array",
                ));
            }
        },
        other => {
            return Err(CalendarError::invalid(
                "events",
                format!("expected a sequence, got {}", json_kind(&other)),
            ));
        }
    };

    let events = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let event: Event = serde_json::from_value(item)
                .map_err(|e| CalendarError::invalid("event", format!("event {index}: {e}")))?;
            event.validate()?;
            Ok(event)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = events.len(), "parsed events");
    Ok(events)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
