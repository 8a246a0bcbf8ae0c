use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::error::{FieldError, FieldWarning};
use super::types::{
    AbstractCue, AbstractStats, RelayMetadata, SubmissionDraft, SubmissionField, SubmissionReport,
};

pub const MIN_ABSTRACT_LINES: usize = 8;
pub const MIN_ABSTRACT_WORDS: usize = 60;
pub const MAX_ABSTRACT_LINES: usize = 15;
pub const MAX_ABSTRACT_WORDS: usize = 200;
pub const MAX_REFERENCES: usize = 3;
/// Titles longer than this get a warning, never a block.
pub const TITLE_ADVISORY_CHARS: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// True for absolute `http`/`https` URLs.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Non-blank, trimmed lines of the references field.
pub fn reference_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Blocking errors for one field.
pub fn validate_field(field: SubmissionField, draft: &SubmissionDraft) -> Vec<FieldError> {
    let value = draft.value(field).trim();

    if SubmissionField::REQUIRED.contains(&field) && value.is_empty() {
        return vec![FieldError::Required(field)];
    }

    match field {
        SubmissionField::Email if !is_valid_email(value) => vec![FieldError::InvalidEmail],
        SubmissionField::Abstract => {
            let stats = AbstractStats::of(value);
            if stats.lines > MAX_ABSTRACT_LINES || stats.words > MAX_ABSTRACT_WORDS {
                vec![FieldError::AbstractTooLong {
                    lines: stats.lines,
                    words: stats.words,
                }]
            } else if stats.lines < MIN_ABSTRACT_LINES || stats.words < MIN_ABSTRACT_WORDS {
                vec![FieldError::AbstractTooShort {
                    lines: stats.lines,
                    words: stats.words,
                }]
            } else {
                Vec::new()
            }
        }
        SubmissionField::References => {
            let lines = reference_lines(value);
            let mut errors: Vec<FieldError> = lines
                .iter()
                .filter(|line| !is_valid_url(line))
                .map(|line| FieldError::InvalidUrl(line.to_string()))
                .collect();
            if lines.len() > MAX_REFERENCES {
                errors.push(FieldError::TooManyReferences(lines.len()));
            }
            errors
        }
        _ => Vec::new(),
    }
}

/// Validates every field and collects advisory warnings.
pub fn validate_draft(draft: &SubmissionDraft) -> SubmissionReport {
    let errors: Vec<FieldError> = [
        SubmissionField::Title,
        SubmissionField::Speakers,
        SubmissionField::Email,
        SubmissionField::Affiliation,
        SubmissionField::Abstract,
        SubmissionField::References,
    ]
    .into_iter()
    .flat_map(|field| validate_field(field, draft))
    .collect();

    let mut warnings = Vec::new();

    let title_chars = draft.title.trim().chars().count();
    if title_chars > TITLE_ADVISORY_CHARS {
        warnings.push(FieldWarning::TitleTooLong(title_chars));
    }

    let stats = AbstractStats::of(&draft.abstract_text);
    let abstract_blocked = errors.iter().any(|e| e.field() == SubmissionField::Abstract);
    if !abstract_blocked && stats.cue() != AbstractCue::Ideal {
        warnings.push(FieldWarning::AbstractOutsideIdeal(stats));
    }

    SubmissionReport { errors, warnings }
}

/// Form fields posted to the relay, in form order.
pub fn relay_fields(draft: &SubmissionDraft, meta: &RelayMetadata) -> Vec<(String, String)> {
    let mut fields = vec![
        ("title".to_string(), draft.title.clone()),
        ("speakers".to_string(), draft.speakers.clone()),
        ("email".to_string(), draft.email.clone()),
        ("affiliation".to_string(), draft.affiliation.clone()),
        ("abstract".to_string(), draft.abstract_text.clone()),
    ];

    let references = reference_lines(&draft.references)
        .iter()
        .enumerate()
        .map(|(i, url)| format!("Reference {}: {}", i + 1, url))
        .collect::<Vec<_>>()
        .join("\n");
    fields.push(("references".to_string(), references));

    if let Some(notes) = &draft.notes {
        fields.push(("notes".to_string(), notes.clone()));
    }

    fields.push(("_subject".to_string(), meta.subject.clone()));
    fields.push(("_cc".to_string(), meta.cc.clone()));
    fields.push(("_next".to_string(), meta.next.clone()));
    fields
}
