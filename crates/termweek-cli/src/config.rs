//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use termweek_core::{CalendarConfig, CalendarError, CalendarSource};

/// Application configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Academic years, their terms, and the year in effect.
    #[serde(flatten)]
    pub calendar: CalendarSource,

    /// Offset applied to clock times in labels, in minutes east of UTC.
    #[serde(default)]
    pub display_offset_minutes: i32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("academic_year", &self.calendar.academic_year)
            .field("years", &self.calendar.terms.keys().collect::<Vec<_>>())
            .field("display_offset_minutes", &self.display_offset_minutes)
            .finish()
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TERMWEEK_*)
        figment = figment.merge(Env::prefixed("TERMWEEK_"));

        figment.extract()
    }

    /// Builds the calendar for `year`, or for the configured academic year.
    pub fn calendar(&self, year: Option<&str>) -> Result<CalendarConfig, CalendarError> {
        match year {
            Some(year) => self.calendar.for_year(year),
            None => self.calendar.active(),
        }
    }

    /// The offset labels are rendered at.
    pub fn display_offset(&self) -> Result<FixedOffset, CalendarError> {
        self.display_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| CalendarError::InvalidArgument {
                field: "display_offset_minutes",
                reason: format!("{} minutes is not a valid UTC offset", self.display_offset_minutes),
            })
    }
}

/// Returns the platform-specific config directory for termweek.
///
/// On Linux: `~/.config/termweek`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("termweek"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    const CALENDAR: &str = r#"
academic_year = "2014"
display_offset_minutes = 60

[[terms.2014]]
name = "michaelmas"
label = "Michaelmas"
start = "2014-10-09"
end = "2014-12-03"

[[terms.2014]]
name = "lent"
label = "Lent"
start = "2015-01-15"
end = "2015-03-11"

[[terms.2015]]
name = "michaelmas"
label = "Michaelmas"
start = "2015-10-08"
end = "2015-12-02"
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_dirs_config_path_ends_with_termweek() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "termweek");
    }

    #[test]
    fn test_default_config_has_no_calendar() {
        let config = Config::default();
        assert!(config.calendar.terms.is_empty());
        assert!(config.calendar(None).is_err());
        assert_eq!(config.display_offset().unwrap(), FixedOffset::east_opt(0).unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(CALENDAR);
        let config = Config::load_from(Some(file.path())).unwrap();

        let calendar = config.calendar(None).unwrap();
        assert_eq!(calendar.academic_year(), "2014");
        assert_eq!(calendar.terms().len(), 2);
        assert_eq!(config.display_offset().unwrap(), FixedOffset::east_opt(3600).unwrap());
    }

    #[test]
    fn test_year_override() {
        let file = write_config(CALENDAR);
        let config = Config::load_from(Some(file.path())).unwrap();

        let calendar = config.calendar(Some("2015")).unwrap();
        assert_eq!(calendar.terms()[0].start.to_string(), "2015-10-08");
        assert!(matches!(
            config.calendar(Some("2016")),
            Err(CalendarError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_terms_out_of_order() {
        let file = write_config(
            r#"
academic_year = "2014"

[[terms.2014]]
name = "lent"
label = "Lent"
start = "2015-01-13"
end = "2015-03-13"

[[terms.2014]]
name = "michaelmas"
label = "Michaelmas"
start = "2014-10-07"
end = "2014-12-05"
"#,
        );
        let config = Config::load_from(Some(file.path())).unwrap();
        assert!(matches!(
            config.calendar(None),
            Err(CalendarError::InvalidArgument { field: "term order", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_offset() {
        let config = Config {
            display_offset_minutes: 24 * 60,
            ..Config::default()
        };
        assert!(config.display_offset().is_err());
    }
}
