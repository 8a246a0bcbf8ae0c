use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FieldError, FieldWarning};
use crate::serde::{deserialize_optional_string, deserialize_trimmed_string};
use crate::settings::SiteSettings;

/// Form fields of a speaker proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionField {
    Title,
    Speakers,
    Email,
    Affiliation,
    Abstract,
    References,
}

impl SubmissionField {
    /// Fields that may not be blank.
    pub const REQUIRED: [SubmissionField; 5] = [
        SubmissionField::Title,
        SubmissionField::Speakers,
        SubmissionField::Email,
        SubmissionField::Affiliation,
        SubmissionField::Abstract,
    ];

    /// Form field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionField::Title => "title",
            SubmissionField::Speakers => "speakers",
            SubmissionField::Email => "email",
            SubmissionField::Affiliation => "affiliation",
            SubmissionField::Abstract => "abstract",
            SubmissionField::References => "references",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transient proposal form buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub title: String,
    /// Speaker names as typed.
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub speakers: String,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub affiliation: String,
    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "deserialize_trimmed_string"
    )]
    pub abstract_text: String,
    /// One URL per line.
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub references: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub notes: Option<String>,
}

impl SubmissionDraft {
    /// Raw value of a field.
    pub fn value(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Title => &self.title,
            SubmissionField::Speakers => &self.speakers,
            SubmissionField::Email => &self.email,
            SubmissionField::Affiliation => &self.affiliation,
            SubmissionField::Abstract => &self.abstract_text,
            SubmissionField::References => &self.references,
        }
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advisory state of the abstract length counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractCue {
    /// 10-12 lines and 80-150 words.
    Ideal,
    /// Neither ideal nor beyond the hard limits.
    Acceptable,
    /// Beyond 15 lines or 200 words.
    OutOfBounds,
}

/// Line and word counts of an abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbstractStats {
    pub lines: usize,
    pub words: usize,
}

impl AbstractStats {
    /// Counts lines and words of the trimmed text.
    pub fn of(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self { lines: 0, words: 0 };
        }
        Self {
            lines: text.split('\n').count(),
            words: text.split_whitespace().count(),
        }
    }

    pub fn cue(&self) -> AbstractCue {
        if (10..=12).contains(&self.lines) && (80..=150).contains(&self.words) {
            AbstractCue::Ideal
        } else if self.lines > 15 || self.words > 200 {
            AbstractCue::OutOfBounds
        } else {
            AbstractCue::Acceptable
        }
    }
}

impl fmt::Display for AbstractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines, {} words", self.lines, self.words)
    }
}

/// Outcome of validating a whole draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
}

impl SubmissionReport {
    /// True when no blocking error was found.
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors attached to one field.
    pub fn errors_for(&self, field: SubmissionField) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field() == field).collect()
    }
}

/// Extra fields the relay uses to route a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMetadata {
    pub subject: String,
    /// Notification recipient.
    pub cc: String,
    /// Success redirect target.
    pub next: String,
}

impl RelayMetadata {
    pub fn from_settings(settings: &SiteSettings, site_url: &str) -> Self {
        Self {
            subject: format!("New Speaker Proposal - {}", settings.seminar_title),
            cc: settings.contact_email.clone(),
            next: format!("{site_url}#success"),
        }
    }
}
