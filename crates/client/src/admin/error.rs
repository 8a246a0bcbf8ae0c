use seminar_core::document::StoreError;
use seminar_core::event::EditError;
use thiserror::Error;

use super::AdminState;

/// Errors surfaced by the admin workflow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Not connected")]
    NotConnected,
    #[error("No document loaded")]
    NoDocument,
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: AdminState,
    },
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Nothing to back up")]
    NothingToBackup,
    #[error("Token, owner and repository are all required")]
    MissingCredentials,
}

impl From<EditError> for AdminError {
    fn from(error: EditError) -> Self {
        match error {
            EditError::InvalidJson(e) => AdminError::InvalidJson(e.to_string()),
            EditError::NotAnArray => AdminError::InvalidJson(error.to_string()),
        }
    }
}

impl AdminError {
    /// True when the operator must reload before trying again.
    pub fn needs_reload(&self) -> bool {
        matches!(self, AdminError::Store(e) if e.is_conflict())
    }
}

/// Result type for admin workflow operations.
pub type Result<T> = std::result::Result<T, AdminError>;
