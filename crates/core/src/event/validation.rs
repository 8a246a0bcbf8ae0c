use std::collections::HashSet;

use serde_json::Value;

use super::error::{RecordError, ScheduleError, ValidationError};
use super::types::{parse_event_datetime, EventRecord, Level};

/// Fields every schedule record must carry.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "id",
    "title",
    "speakers",
    "affiliation",
    "datetime",
    "duration_min",
    "level",
    "tags",
    "abstract",
];

const STRING_FIELDS: [&str; 4] = ["id", "title", "affiliation", "abstract"];
const STRING_ARRAY_FIELDS: [&str; 2] = ["speakers", "tags"];

/// Parses and validates a schedule document.
pub fn parse_schedule(text: &str) -> Result<Vec<EventRecord>, ScheduleError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ScheduleError::InvalidJson(e.to_string()))?;
    validate_schedule(&value)
}

/// Validates every record of a schedule document.
///
/// Errors are accumulated: each failing record reports all of its
/// violations, and every failing record is reported.
pub fn validate_schedule(value: &Value) -> Result<Vec<EventRecord>, ScheduleError> {
    let Some(items) = value.as_array() else {
        return Err(ScheduleError::NotAnArray);
    };

    let mut records = Vec::with_capacity(items.len());
    let mut failures = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let id = item.get("id").and_then(Value::as_str).map(str::to_string);

        let mut errors = match validate_record(item) {
            Ok(record) => {
                records.push(record);
                Vec::new()
            }
            Err(errors) => errors,
        };

        if let Some(id) = &id {
            if !seen_ids.insert(id.clone()) {
                errors.push(ValidationError::DuplicateId(id.clone()));
            }
        }

        if !errors.is_empty() {
            failures.push(RecordError { index, id, errors });
        }
    }

    if failures.is_empty() {
        Ok(records)
    } else {
        Err(ScheduleError::InvalidRecords(failures))
    }
}

/// Validates a single record and converts it into an [`EventRecord`].
pub fn validate_record(value: &Value) -> Result<EventRecord, Vec<ValidationError>> {
    let Some(object) = value.as_object() else {
        return Err(vec![ValidationError::InvalidType {
            field: "event",
            expected: "an object",
        }]);
    };

    let mut errors: Vec<ValidationError> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| ValidationError::MissingField(*field))
        .collect();

    if let Some(datetime) = object.get("datetime") {
        match datetime.as_str() {
            Some(s) if parse_event_datetime(s).is_some() => {}
            Some(s) => errors.push(ValidationError::InvalidDateTime(s.to_string())),
            None => errors.push(ValidationError::InvalidDateTime(datetime.to_string())),
        }
    }

    if let Some(level) = object.get("level") {
        if level.as_str().and_then(|s| s.parse::<Level>().ok()).is_none() {
            errors.push(ValidationError::InvalidEnum {
                field: "level",
                allowed: "'intro' or 'advanced'",
                value: level.to_string(),
            });
        }
    }

    for field in STRING_ARRAY_FIELDS {
        if let Some(v) = object.get(field) {
            if !is_string_array(v) {
                errors.push(ValidationError::InvalidType {
                    field,
                    expected: "an array of strings",
                });
            }
        }
    }

    for field in STRING_FIELDS {
        if object.get(field).is_some_and(|v| !v.is_string()) {
            errors.push(ValidationError::InvalidType {
                field,
                expected: "a string",
            });
        }
    }

    if let Some(duration) = object.get("duration_min") {
        let positive = duration
            .as_u64()
            .is_some_and(|d| d > 0 && d <= u64::from(u32::MAX));
        if !positive {
            errors.push(ValidationError::InvalidType {
                field: "duration_min",
                expected: "a positive integer",
            });
        }
    }

    if object
        .get("room")
        .is_some_and(|v| !v.is_null() && !v.is_string())
    {
        errors.push(ValidationError::InvalidType {
            field: "room",
            expected: "a string",
        });
    }

    if object.get("references").is_some_and(|v| !is_reference_list(v)) {
        errors.push(ValidationError::InvalidType {
            field: "references",
            expected: "an array of {url, label} objects",
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value.clone()).map_err(|_| {
        vec![ValidationError::InvalidType {
            field: "event",
            expected: "a well-formed event record",
        }]
    })
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

fn is_reference_list(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items.iter().all(|item| {
            item.get("url").is_some_and(Value::is_string)
                && item.get("label").is_some_and(Value::is_string)
        })
    })
}
