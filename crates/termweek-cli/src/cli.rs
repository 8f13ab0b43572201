//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Academic calendar lookups.
///
/// Maps dates to terms and weeks of term, resolves week/day coordinates back
/// to dates, and groups timetable events by term.
#[derive(Debug, Parser)]
#[command(name = "termweek", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Academic year to use instead of the configured one.
    #[arg(short, long, global = true)]
    pub year: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the term a date falls in.
    Term {
        /// Date or timestamp (e.g. 2015-02-18 or 2015-02-18T10:00:00Z).
        date: String,
    },

    /// Show the week of term for a date (W1, W2, ... or OT).
    Week {
        /// Date or timestamp.
        date: String,
    },

    /// Show how many weeks a term has.
    Weeks {
        /// Term name (e.g. michaelmas).
        term: String,
    },

    /// Resolve a term, week and weekday to a date.
    Date {
        /// Term name.
        term: String,
        /// Week of term.
        week: u32,
        /// Day of week, 1 (Monday) to 7 (Sunday).
        #[arg(value_parser = clap::value_parser!(u32).range(1..=7))]
        day: u32,
    },

    /// Show the first day of a term.
    FirstDay {
        /// Term name.
        term: String,
    },

    /// Render the display label for an event.
    Label {
        /// Event start timestamp.
        start: String,
        /// Event end timestamp.
        end: String,
    },

    /// Group events by term, including out-of-term gaps.
    Buckets {
        /// JSON file with events; reads stdin when omitted.
        file: Option<PathBuf>,

        /// Only group by term, dropping out-of-term events.
        #[arg(long)]
        split_only: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the window a calendar view fetches around a date.
    Range {
        /// View type: day, week or month.
        view: String,
        /// Date or timestamp at the centre of the view.
        date: String,
    },
}
