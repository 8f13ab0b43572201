//! Terms and the calendar configuration they belong to.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CalendarError, Result};

/// A named, bounded academic period such as Michaelmas or Lent.
///
/// Both `start` and `end` are inclusive calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Stable identifier used for lookups (e.g. `michaelmas`).
    pub name: String,
    /// Display name used for bucket labels (e.g. `Michaelmas`).
    pub label: String,
    /// First day of term.
    pub start: NaiveDate,
    /// Last day of term.
    pub end: NaiveDate,
}

impl Term {
    /// Creates a term after validation.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        let term = Self {
            name: name.into(),
            label: label.into(),
            start,
            end,
        };
        term.validate()?;
        Ok(term)
    }

    /// Whether `date` falls inside the term, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the two terms share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CalendarError::invalid("term name", "cannot be empty"));
        }
        if self.label.trim().is_empty() {
            return Err(CalendarError::invalid(
                "term label",
                format!("term {} has an empty label", self.name),
            ));
        }
        if self.start > self.end {
            return Err(CalendarError::range(
                "term",
                format!("{} {}", self.name, self.start),
                self.end,
            ));
        }
        Ok(())
    }
}

/// The terms of one academic year.
///
/// Immutable once built. Every engine operation takes it explicitly, so
/// callers decide which year is in effect and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarConfig {
    academic_year: String,
    terms: Vec<Term>,
}

impl CalendarConfig {
    /// Builds a configuration from terms listed in chronological order.
    ///
    /// Term names and labels must be unique, and each term must start no
    /// earlier than the one before it. Overlapping terms are accepted with a
    /// warning: lookups resolve them to the first matching term.
    pub fn new(academic_year: impl Into<String>, terms: Vec<Term>) -> Result<Self> {
        let academic_year = academic_year.into();
        if academic_year.trim().is_empty() {
            return Err(CalendarError::invalid("academic year", "cannot be empty"));
        }

        let mut names = HashSet::new();
        let mut labels = HashSet::new();
        for term in &terms {
            term.validate()?;
            if !names.insert(term.name.as_str()) {
                return Err(CalendarError::invalid(
                    "term name",
                    format!("duplicate term {} in {academic_year}", term.name),
                ));
            }
            if !labels.insert(term.label.as_str()) {
                return Err(CalendarError::invalid(
                    "term label",
                    format!("duplicate label {} in {academic_year}", term.label),
                ));
            }
        }

        for pair in terms.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.start < previous.start {
                return Err(CalendarError::invalid(
                    "term order",
                    format!(
                        "{} starts on {} before {} which starts on {}",
                        next.name, next.start, previous.name, previous.start
                    ),
                ));
            }
        }

        for (i, earlier) in terms.iter().enumerate() {
            for later in &terms[i + 1..] {
                if earlier.overlaps(later) {
                    tracing::warn!(
                        academic_year = %academic_year,
                        first = %earlier.name,
                        second = %later.name,
                        "terms overlap; the first one wins lookups"
                    );
                }
            }
        }

        Ok(Self {
            academic_year,
            terms,
        })
    }

    /// The academic-year identifier (e.g. `2014`).
    pub fn academic_year(&self) -> &str {
        &self.academic_year
    }

    /// Terms in configured order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// Term listings for several academic years plus the year in effect.
///
/// This is the document shape read from configuration files:
///
/// ```toml
/// academic_year = "2014"
///
/// [[terms.2014]]
/// name = "michaelmas"
/// label = "Michaelmas"
/// start = "2014-10-09"
/// end = "2014-12-03"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSource {
    /// The academic year used when none is requested explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,

    /// Terms per academic year, each list in chronological order.
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<Term>>,
}

impl CalendarSource {
    /// Builds the configuration for the default academic year.
    pub fn active(&self) -> Result<CalendarConfig> {
        let year = self
            .academic_year
            .as_deref()
            .ok_or_else(|| CalendarError::invalid("academic year", "no academic year is configured"))?;
        self.for_year(year)
    }

    /// Builds the configuration for a specific academic year.
    pub fn for_year(&self, year: &str) -> Result<CalendarConfig> {
        let terms = self.terms.get(year).ok_or_else(|| CalendarError::NotFound {
            kind: "academic year",
            name: year.to_string(),
        })?;
        CalendarConfig::new(year, terms.clone())
    }
}
