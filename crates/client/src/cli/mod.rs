//! CLI command definitions.

pub mod admin;
pub mod export;
pub mod schedule;
pub mod submit;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

/// Schedule, admin and proposal tools for the seminar site.
#[derive(Debug, Parser)]
#[command(name = "seminar")]
#[command(about = "Schedule, admin and proposal tools for the seminar site", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Site settings file.
    #[arg(
        long,
        global = true,
        env = "SEMINAR_SETTINGS",
        default_value = "data/settings.json"
    )]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show upcoming and past talks.
    Schedule(schedule::ScheduleArgs),
    /// Show the next upcoming talk.
    Next(schedule::NextArgs),
    /// Validate a local schedule file.
    Validate(schedule::ValidateArgs),
    /// Export a talk as an .ics file.
    Ics(export::IcsArgs),
    /// Validate a speaker proposal and send it to the relay.
    Submit(submit::SubmitArgs),
    /// Edit a document in the hosted repository.
    Admin(admin::AdminCommand),
}

/// Parses an RFC 3339 instant for `--now`.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}
