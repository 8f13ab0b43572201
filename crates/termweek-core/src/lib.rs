//! Academic calendar mapping.
//!
//! This crate converts between calendar dates and an institution's
//! term / week-of-term / weekday coordinates:
//! - Week: which term a date falls in and its week number, and the reverse
//! - Classify: grouping events per term, including out-of-term gaps
//! - Display: compact labels such as `W5 · Wed 10am-5:30pm`
//!
//! Every operation takes a [`CalendarConfig`] explicitly and is a pure
//! function of its arguments.

pub mod classify;
pub mod display;
pub mod event;
pub mod range;
mod term;
mod types;
pub mod week;

pub use classify::{
    OUT_OF_TERM_LABEL, SplitEvents, TermBucket, order_events_by_term, split_events_by_term,
};
pub use display::{day_name, day_number, display_label, generate_display_date, month_name};
pub use event::{Event, TimedEvent, parse_events};
pub use range::{CalendarView, is_date_in_range, view_range, weeks_in_date_range};
pub use term::{CalendarConfig, CalendarSource, Term};
pub use types::{CalendarError, Result, Timestamp, WeekNumber};
pub use week::{
    first_day_of_term, get_date_by_week_and_day, get_term, get_term_by_name, get_week_in_term,
    get_weeks_in_term,
};
