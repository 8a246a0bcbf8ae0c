use thiserror::Error;

use super::types::{AbstractStats, SubmissionField};

/// A blocking problem with one form field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(SubmissionField),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Abstract should be 10-12 lines (approximately 80-150 words), got {lines} lines and {words} words")]
    AbstractTooShort { lines: usize, words: usize },
    #[error("Abstract is too long, please keep it to 10-12 lines (got {lines} lines and {words} words)")]
    AbstractTooLong { lines: usize, words: usize },
    #[error("Please enter valid URLs (one per line): {0}")]
    InvalidUrl(String),
    #[error("Please provide no more than 3 references (got {0})")]
    TooManyReferences(usize),
}

impl FieldError {
    /// The field the error should be shown next to.
    pub fn field(&self) -> SubmissionField {
        match self {
            FieldError::Required(field) => *field,
            FieldError::InvalidEmail => SubmissionField::Email,
            FieldError::AbstractTooShort { .. } | FieldError::AbstractTooLong { .. } => {
                SubmissionField::Abstract
            }
            FieldError::InvalidUrl(_) | FieldError::TooManyReferences(_) => {
                SubmissionField::References
            }
        }
    }
}

/// A non-blocking cue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldWarning {
    #[error("Title should be under 100 characters (currently {0})")]
    TitleTooLong(usize),
    #[error("Abstract is outside the ideal 10-12 lines and 80-150 words ({} lines, {} words)", .0.lines, .0.words)]
    AbstractOutsideIdeal(AbstractStats),
}
