//! seminar_client - I/O side of the seminar tools.
//!
//! The hosting API document store, the admin editing session,
//! the proposal relay, configuration, and the `seminar` CLI definitions.

pub mod admin;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod output;
pub mod relay;
#[cfg(test)]
pub(crate) mod store;

pub use admin::{AdminError, AdminSession, AdminState};
pub use config::{load_settings, Config};
pub use error::{ClientError, Result};
pub use github::GitHubClient;
pub use relay::{FormRelayClient, ProposalRelay, SubmissionForm, SubmitOutcome};
