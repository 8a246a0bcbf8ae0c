use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_event_datetime, deserialize_optional_string};

/// Parses a talk start time.
///
/// Accepts RFC 3339 and the ISO-8601 form without seconds, such as
/// `2099-01-01T10:00+02:00`. An explicit offset or `Z` is required.
pub fn parse_event_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime);
    }
    let with_offset = match text.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => text.to_string(),
    };
    DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z").ok()
}

/// Audience level of a talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Intro,
    Advanced,
}

impl Level {
    /// All accepted values, in display order.
    pub const ALL: [Level; 2] = [Level::Intro, Level::Advanced];

    /// The wire value stored in the schedule document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Intro => "intro",
            Level::Advanced => "advanced",
        }
    }

    /// Human-readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Intro => "Introductory",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intro" => Ok(Level::Intro),
            "advanced" => Ok(Level::Advanced),
            other => Err(other.to_string()),
        }
    }
}

/// A labelled link attached to a talk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    pub label: String,
}

impl Reference {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

/// One seminar talk as stored in the schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable identifier, used as link fragment and calendar UID component.
    pub id: String,
    pub title: String,
    pub speakers: Vec<String>,
    pub affiliation: String,
    /// Start instant with the offset it was authored in.
    #[serde(deserialize_with = "deserialize_event_datetime")]
    pub datetime: DateTime<FixedOffset>,
    pub duration_min: u32,
    /// Falls back to the configured default room when absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub room: Option<String>,
    pub level: Level,
    /// Insertion order is kept for display.
    pub tags: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl EventRecord {
    /// Creates a record with the required fields and empty optional ones.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        datetime: DateTime<FixedOffset>,
        level: Level,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            speakers: Vec::new(),
            affiliation: String::new(),
            datetime,
            duration_min: 60,
            room: None,
            level,
            tags: Vec::new(),
            abstract_text: String::new(),
            references: Vec::new(),
        }
    }

    pub fn with_speakers<I, S>(mut self, speakers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.speakers = speakers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_min = minutes;
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// The start instant in UTC.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// The end instant in UTC (start plus duration).
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at() + Duration::minutes(i64::from(self.duration_min))
    }

    /// Returns the room, or `default` when the record has none.
    pub fn room_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.room.as_deref().unwrap_or(default)
    }

    /// Speakers joined for display.
    pub fn speaker_line(&self) -> String {
        self.speakers.join(", ")
    }
}
