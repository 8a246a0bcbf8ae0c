//! Calendar export CLI commands.

use std::path::PathBuf;

use clap::Args;
use seminar_core::calendar::ics_file_name;
use seminar_core::event::EventRecord;

/// Arguments for `ics`.
#[derive(Debug, Args)]
pub struct IcsArgs {
    /// Event id.
    pub id: String,
    /// Schedule file.
    #[arg(long, default_value = "data/schedule.json")]
    pub file: PathBuf,
    /// Output path, defaults to `<id>.ics`.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl IcsArgs {
    /// `--output`, or the event's calendar file name in the working directory.
    pub fn output_path(&self, event: &EventRecord) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(ics_file_name(event)))
    }
}
