//! JSON output formatting.

use serde::Serialize;

use seminar_core::event::{EventRecord, ScheduleView};

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[derive(Serialize)]
struct ScheduleJson<'a> {
    upcoming: &'a [&'a EventRecord],
    past: &'a [&'a EventRecord],
}

/// Format a rendered schedule as `{"upcoming": [...], "past": [...]}`.
pub fn format_schedule(view: &ScheduleView<'_>) -> String {
    format_json(&ScheduleJson {
        upcoming: &view.upcoming,
        past: &view.past,
    })
}
