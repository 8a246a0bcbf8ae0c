//! Schedule CLI commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use seminar_core::event::Level;

use super::parse_instant;

/// Arguments for `schedule`.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Schedule file.
    #[arg(long, default_value = "data/schedule.json")]
    pub file: PathBuf,
    /// Free-text search over title, speakers, abstract and affiliation.
    #[arg(long, short, default_value = "")]
    pub query: String,
    /// Topic (tag) filter.
    #[arg(long, short, default_value = "")]
    pub topic: String,
    /// Level filter (intro or advanced).
    #[arg(long, short)]
    pub level: Option<Level>,
    /// Show times in the local timezone instead of the seminar's.
    #[arg(long)]
    pub local_time: bool,
    /// Reference instant (RFC 3339), defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,
}

/// Arguments for `next`.
#[derive(Debug, Args)]
pub struct NextArgs {
    /// Schedule file.
    #[arg(long, default_value = "data/schedule.json")]
    pub file: PathBuf,
    /// Show times in the local timezone instead of the seminar's.
    #[arg(long)]
    pub local_time: bool,
    /// Reference instant (RFC 3339), defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,
}

/// Arguments for `validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Schedule file to check.
    pub file: PathBuf,
}
