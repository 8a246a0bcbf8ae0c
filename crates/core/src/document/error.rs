use thiserror::Error;

/// Errors that can occur when reading or writing a remote document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Authentication failed ({status}): {message}")]
    AuthFailure { status: u16, message: String },
    #[error("Document not found: {path}")]
    NotFound { path: String },
    #[error("Version conflict on {path}: {message}")]
    Conflict { path: String, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

impl StoreError {
    /// True for stale-version rejections.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// True when re-invoking the same action may succeed.
    ///
    /// A conflict needs a reload first.
    pub fn is_retryable(&self) -> bool {
        !self.is_conflict()
    }
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
