//! Speaker proposal CLI command.

use std::path::PathBuf;

use clap::Args;

/// Arguments for `submit`.
///
/// Fields come from `--draft` (a JSON draft) and are overridden by the
/// individual flags.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// JSON file with draft fields.
    #[arg(long)]
    pub draft: Option<PathBuf>,
    /// Talk title.
    #[arg(long)]
    pub title: Option<String>,
    /// Speaker names.
    #[arg(long)]
    pub speakers: Option<String>,
    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,
    /// Speaker affiliation.
    #[arg(long)]
    pub affiliation: Option<String>,
    /// File holding the abstract text.
    #[arg(long)]
    pub abstract_file: Option<PathBuf>,
    /// Reference URL, repeatable.
    #[arg(long = "reference")]
    pub references: Vec<String>,
    /// Notes for the organizers.
    #[arg(long)]
    pub notes: Option<String>,
    /// Print the relay payload instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}
