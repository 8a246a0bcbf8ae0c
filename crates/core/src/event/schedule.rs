use chrono::{DateTime, Utc};

use super::types::{EventRecord, Level};

/// Visitor-selected filters for the schedule page.
///
/// Empty text filters and a missing level match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleCriteria {
    /// Free-text query over title, speakers, abstract and affiliation.
    pub query: String,
    /// Substring of any tag.
    pub topic: String,
    pub level: Option<Level>,
}

impl ScheduleCriteria {
    /// Criteria that match every event.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Returns true if the event passes every filter.
    pub fn matches(&self, event: &EventRecord) -> bool {
        self.matches_query(event) && self.matches_topic(event) && self.matches_level(event)
    }

    fn matches_query(&self, event: &EventRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        contains_ci(&event.title, &needle)
            || event.speakers.iter().any(|s| contains_ci(s, &needle))
            || contains_ci(&event.abstract_text, &needle)
            || contains_ci(&event.affiliation, &needle)
    }

    fn matches_topic(&self, event: &EventRecord) -> bool {
        if self.topic.is_empty() {
            return true;
        }
        let needle = self.topic.to_lowercase();
        event.tags.iter().any(|tag| contains_ci(tag, &needle))
    }

    fn matches_level(&self, event: &EventRecord) -> bool {
        self.level.is_none_or(|level| event.level == level)
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// The rendered schedule, split around the current instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleView<'a> {
    /// Soonest first.
    pub upcoming: Vec<&'a EventRecord>,
    /// Most recent first.
    pub past: Vec<&'a EventRecord>,
}

impl ScheduleView<'_> {
    /// Total number of events in both partitions.
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    /// True when no event matched the criteria.
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }
}

/// Filters events by the given criteria, preserving collection order.
pub fn filter_events<'a>(
    events: &'a [EventRecord],
    criteria: &ScheduleCriteria,
) -> Vec<&'a EventRecord> {
    events
        .iter()
        .filter(|event| criteria.matches(event))
        .collect()
}

/// Returns true if the event starts strictly after `now`.
pub fn is_upcoming(event: &EventRecord, now: DateTime<Utc>) -> bool {
    event.starts_at() > now
}

/// Splits events into upcoming (ascending) and past (descending).
///
/// An event starting exactly at `now` is past.
pub fn partition_events(events: Vec<&EventRecord>, now: DateTime<Utc>) -> ScheduleView<'_> {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) =
        events.into_iter().partition(|event| is_upcoming(event, now));

    upcoming.sort_by_key(|event| event.starts_at());
    past.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));

    ScheduleView { upcoming, past }
}

/// Filters and partitions the schedule.
///
/// Pure: the same inputs always produce the same view.
pub fn render<'a>(
    events: &'a [EventRecord],
    criteria: &ScheduleCriteria,
    now: DateTime<Utc>,
) -> ScheduleView<'a> {
    partition_events(filter_events(events, criteria), now)
}

/// The next talk after `now`, if any.
pub fn next_upcoming(events: &[EventRecord], now: DateTime<Utc>) -> Option<&EventRecord> {
    events
        .iter()
        .filter(|event| is_upcoming(event, now))
        .min_by_key(|event| event.starts_at())
}

/// Distinct tags in first-seen order, for topic pickers.
pub fn collect_topics(events: &[EventRecord]) -> Vec<&str> {
    let mut topics: Vec<&str> = Vec::new();
    for tag in events.iter().flat_map(|event| event.tags.iter()) {
        if !topics.contains(&tag.as_str()) {
            topics.push(tag);
        }
    }
    topics
}

/// Looks up an event by id.
pub fn find_event<'a>(events: &'a [EventRecord], id: &str) -> Option<&'a EventRecord> {
    events.iter().find(|event| event.id == id)
}
