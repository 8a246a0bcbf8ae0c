//! Speaker proposal form rules.
//!
//! Blocking errors stop a submission; warnings are only shown as cues.

mod error;
mod types;
mod validation;

pub use error::{FieldError, FieldWarning};
pub use types::{
    AbstractCue, AbstractStats, RelayMetadata, SubmissionDraft, SubmissionField, SubmissionReport,
};
pub use validation::{
    is_valid_email, is_valid_url, reference_lines, relay_fields, validate_draft, validate_field,
    MAX_ABSTRACT_LINES, MAX_ABSTRACT_WORDS, MAX_REFERENCES, MIN_ABSTRACT_LINES,
    MIN_ABSTRACT_WORDS, TITLE_ADVISORY_CHARS,
};
