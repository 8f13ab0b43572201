//! CLI subcommand implementations.

pub mod buckets;
pub mod label;
pub mod lookup;
pub mod range;
pub(crate) mod util;
