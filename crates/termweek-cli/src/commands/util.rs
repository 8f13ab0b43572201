//! Shared utilities for CLI commands.

use anyhow::Context;
use termweek_core::Timestamp;

/// Parse a command-line date or timestamp.
///
/// Supports:
/// - ISO 8601 timestamps: "2015-02-18T10:00:00Z"
/// - Bare dates, read as midnight UTC: "2015-02-18"
pub fn parse_timestamp(s: &str, name: &str) -> anyhow::Result<Timestamp> {
    Timestamp::parse(s).with_context(|| {
        format!("invalid {name}, expected ISO 8601 (e.g., 2015-02-18 or 2015-02-18T10:00:00Z)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_timestamps() {
        assert_eq!(
            parse_timestamp("2015-02-18", "date").unwrap().to_string(),
            "2015-02-18T00:00:00Z"
        );
        assert_eq!(
            parse_timestamp("2015-02-18T11:00:00+01:00", "date").unwrap().to_string(),
            "2015-02-18T10:00:00Z"
        );
    }

    #[test]
    fn error_names_the_argument() {
        let err = parse_timestamp("yesterday", "start").unwrap_err();
        assert!(err.to_string().starts_with("invalid start"));
    }
}
