use std::fmt;

use thiserror::Error;

/// A single rule violation within one schedule record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Invalid datetime format: {0}")]
    InvalidDateTime(String),
    #[error("Field '{field}' must be one of {allowed}, got {value}")]
    InvalidEnum {
        field: &'static str,
        allowed: &'static str,
        value: String,
    },
    #[error("Field '{field}' must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Duplicate event id '{0}'")]
    DuplicateId(String),
}

/// All violations found in the record at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub index: usize,
    pub id: Option<String>,
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event {}", self.index)?;
        if let Some(id) = &self.id {
            write!(f, " ({id})")?;
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, ": {}", messages.join("; "))
    }
}

/// Errors that make a schedule document unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Schedule data must be an array")]
    NotAnArray,
    #[error("{} invalid event(s): {}", .0.len(), join_records(.0))]
    InvalidRecords(Vec<RecordError>),
}

impl ScheduleError {
    /// Record-level errors, empty for structural failures.
    pub fn records(&self) -> &[RecordError] {
        match self {
            ScheduleError::InvalidJson(_) | ScheduleError::NotAnArray => &[],
            ScheduleError::InvalidRecords(records) => records,
        }
    }
}

fn join_records(records: &[RecordError]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Errors from edit buffer operations.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Document must be an array of events")]
    NotAnArray,
}
