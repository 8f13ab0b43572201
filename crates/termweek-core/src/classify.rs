//! Bucketing events by term.
//!
//! Two views are offered:
//!
//! 1. [`split_events_by_term`]: one bucket per configured term. Events whose
//!    start falls outside every term are dropped.
//! 2. [`order_events_by_term`]: the full timeline, with the term buckets
//!    interleaved with one out-of-term (`OT`) bucket per gap that holds at
//!    least one event.

use serde::Serialize;

use crate::event::TimedEvent;
use crate::term::CalendarConfig;
use crate::week::get_term;

/// Label of buckets holding events outside every term.
pub const OUT_OF_TERM_LABEL: &str = "OT";

/// A labeled group of events belonging to one term or one out-of-term gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermBucket<E> {
    /// The term label, or [`OUT_OF_TERM_LABEL`].
    pub label: String,
    pub events: Vec<E>,
}

impl<E> TermBucket<E> {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            events: Vec::new(),
        }
    }

    /// Whether this bucket covers a gap rather than a term.
    pub fn is_out_of_term(&self) -> bool {
        self.label == OUT_OF_TERM_LABEL
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Events grouped per configured term, keyed by term label.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitEvents<E> {
    buckets: Vec<TermBucket<E>>,
}

impl<E> SplitEvents<E> {
    /// The bucket for a term label.
    pub fn get(&self, label: &str) -> Option<&TermBucket<E>> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }

    /// Buckets in configured term order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermBucket<E>> {
        self.buckets.iter()
    }

    /// Total events across all buckets.
    pub fn event_count(&self) -> usize {
        self.buckets.iter().map(TermBucket::len).sum()
    }

    pub fn into_buckets(self) -> Vec<TermBucket<E>> {
        self.buckets
    }
}

impl<'a, E> IntoIterator for &'a SplitEvents<E> {
    type Item = &'a TermBucket<E>;
    type IntoIter = std::slice::Iter<'a, TermBucket<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Assigns each event to the term containing its start.
///
/// Every configured term gets a bucket, even if it stays empty. Events that
/// start outside every term are not returned; use [`order_events_by_term`]
/// to keep them.
pub fn split_events_by_term<E: TimedEvent + Clone>(
    events: &[E],
    config: &CalendarConfig,
) -> SplitEvents<E> {
    let terms = config.terms();
    let mut buckets: Vec<TermBucket<E>> = terms
        .iter()
        .map(|term| TermBucket::new(term.label.clone()))
        .collect();
    let mut dropped = 0_usize;

    for event in events {
        let date = event.start().date();
        match terms.iter().position(|term| term.contains(date)) {
            Some(index) => buckets[index].events.push(event.clone()),
            None => dropped += 1,
        }
    }

    tracing::debug!(
        academic_year = config.academic_year(),
        events = events.len(),
        dropped,
        "split events by term"
    );

    SplitEvents { buckets }
}

/// Builds the chronological bucket sequence for a timeline of events.
///
/// Term buckets come from `split` in configured order. Events in `events`
/// that start outside every term are gathered into `OT` buckets, one per
/// gap: before the first term, between consecutive terms, and after the
/// last. Gaps without events produce no bucket. Events within each bucket
/// are ordered by start.
pub fn order_events_by_term<E: TimedEvent + Clone>(
    split: &SplitEvents<E>,
    events: &[E],
    config: &CalendarConfig,
) -> Vec<TermBucket<E>> {
    let terms = config.terms();

    let mut out_of_term: Vec<&E> = events
        .iter()
        .filter(|event| get_term(config, event.start()).is_none())
        .collect();
    out_of_term.sort_by_key(|event| event.start());

    let mut gaps: Vec<TermBucket<E>> = (0..=terms.len())
        .map(|_| TermBucket::new(OUT_OF_TERM_LABEL))
        .collect();
    for event in out_of_term {
        let date = event.start().date();
        let gap = terms
            .iter()
            .position(|term| date < term.start)
            .unwrap_or(terms.len());
        gaps[gap].events.push(event.clone());
    }

    let mut ordered = Vec::with_capacity(terms.len() * 2 + 1);
    for (index, gap) in gaps.into_iter().enumerate() {
        if !gap.is_empty() {
            ordered.push(gap);
        }
        if let Some(term) = terms.get(index) {
            let mut bucket = split
                .get(&term.label)
                .cloned()
                .unwrap_or_else(|| TermBucket::new(term.label.clone()));
            bucket.events.sort_by_key(TimedEvent::start);
            ordered.push(bucket);
        }
    }

    tracing::debug!(
        academic_year = config.academic_year(),
        buckets = ordered.len(),
        "ordered events by term"
    );

    ordered
}
