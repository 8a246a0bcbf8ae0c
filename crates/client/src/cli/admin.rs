//! Admin CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Remote document editing.
#[derive(Debug, Parser)]
pub struct AdminCommand {
    #[command(flatten)]
    pub auth: AdminAuth,

    /// Document path in the repository, defaults to the schedule path.
    #[arg(long, global = true)]
    pub path: Option<String>,

    #[command(subcommand)]
    pub action: AdminAction,
}

/// Repository credentials. Never written anywhere.
#[derive(Debug, Args)]
pub struct AdminAuth {
    /// Access token.
    #[arg(long, env = "SEMINAR_GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,
    /// Repository owner.
    #[arg(long, env = "SEMINAR_REPO_OWNER", default_value = "")]
    pub owner: String,
    /// Repository name.
    #[arg(long, env = "SEMINAR_REPO_NAME", default_value = "")]
    pub repo: String,
}

/// Write-back flags for mutating actions.
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Save the result to the repository.
    #[arg(long)]
    pub save: bool,
    /// Commit message, defaults to `chore(<file>): update`.
    #[arg(long, short)]
    pub message: Option<String>,
}

/// Available admin actions.
#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Print the document.
    Show,
    /// Check JSON syntax and event records.
    Validate,
    /// Pretty-print the document.
    Format {
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Sort events by date.
    Sort {
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Append a placeholder event one week out.
    AddEvent {
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Replace the document with a local file.
    Restore {
        /// Local JSON file.
        #[arg(long)]
        from: PathBuf,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Write a local backup of the document.
    Backup {
        /// Directory for the backup file.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

impl AdminAction {
    /// Write-back flags, for actions that change the document.
    pub fn save_args(&self) -> Option<&SaveArgs> {
        match self {
            AdminAction::Format { save }
            | AdminAction::Sort { save }
            | AdminAction::AddEvent { save }
            | AdminAction::Restore { save, .. } => Some(save),
            AdminAction::Show | AdminAction::Validate | AdminAction::Backup { .. } => None,
        }
    }
}
