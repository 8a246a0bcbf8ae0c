//! Serde helper functions for schedule and form deserialization.
//!
//! Hand-edited JSON and HTML forms both produce empty strings where a value
//! is really absent; these helpers normalize them to `None`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

use crate::event::parse_event_datetime;

/// Reads an optional string; blank or whitespace-only values become `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Reads a string with surrounding whitespace removed.
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Reads a talk start time in any form [`parse_event_datetime`] accepts.
pub fn deserialize_event_datetime<'de, D>(
    deserializer: D,
) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_event_datetime(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime '{s}'")))
}
