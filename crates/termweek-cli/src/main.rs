use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use termweek_core::CalendarConfig;
use tracing_subscriber::EnvFilter;

use termweek_cli::commands::{buckets, label, lookup, range};
use termweek_cli::{Cli, Commands, Config, dirs_config_path};

/// Load config and build the calendar for the requested academic year.
fn load_calendar(
    config_path: Option<&Path>,
    year: Option<&str>,
) -> Result<(CalendarConfig, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let calendar = config.calendar(year).with_context(|| {
        let location = config_path
            .map(Path::to_path_buf)
            .or_else(|| dirs_config_path().map(|dir| dir.join("config.toml")));
        match location {
            Some(path) => format!("failed to load academic calendar from {}", path.display()),
            None => "failed to load academic calendar".to_string(),
        }
    })?;
    tracing::debug!(
        academic_year = calendar.academic_year(),
        terms = calendar.terms().len(),
        "loaded calendar"
    );
    Ok((calendar, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config.as_deref();
    let year = cli.year.as_deref();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Term { date }) => {
            let (calendar, _config) = load_calendar(config_path, year)?;
            lookup::term(&mut stdout, &calendar, date)?;
        }
        Some(Commands::Week { date }) => {
            let (calendar, _config) = load_calendar(config_path, year)?;
            lookup::week(&mut stdout, &calendar, date)?;
        }
        Some(Commands::Weeks { term }) => {
            let (calendar, _config) = load_calendar(config_path, year)?;
            lookup::weeks(&mut stdout, &calendar, term)?;
        }
        Some(Commands::Date { term, week, day }) => {
            let (calendar, _config) = load_calendar(config_path, year)?;
            lookup::date(&mut stdout, &calendar, term, *week, *day)?;
        }
        Some(Commands::FirstDay { term }) => {
            let (calendar, _config) = load_calendar(config_path, year)?;
            lookup::first_day(&mut stdout, &calendar, term)?;
        }
        Some(Commands::Label { start, end }) => {
            let (calendar, config) = load_calendar(config_path, year)?;
            label::run(&mut stdout, &calendar, config.display_offset()?, start, end)?;
        }
        Some(Commands::Buckets {
            file,
            split_only,
            json,
        }) => {
            let (calendar, config) = load_calendar(config_path, year)?;
            let events = buckets::read_events(file.as_deref(), &mut std::io::stdin().lock())?;
            buckets::run(
                &mut stdout,
                &calendar,
                config.display_offset()?,
                &events,
                *split_only,
                *json,
            )?;
        }
        Some(Commands::Range { view, date }) => {
            // Range windows don't depend on the calendar
            range::run(&mut stdout, view, date)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
