use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::event::EventRecord;
use crate::settings::SiteSettings;

const PRODID: &str = "-//Complex Systems Seminar//EN";

/// Generates a single-event calendar for a talk.
pub fn generate_ics(event: &EventRecord, settings: &SiteSettings) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@{}", event.id, settings.calendar_uid_domain));
    ics_event.add_property("DTSTART", utc_stamp(&event.starts_at()));
    ics_event.add_property("DTEND", utc_stamp(&event.ends_at()));
    ics_event.summary(&event.title);
    ics_event.description(&format!(
        "{}\n\nSpeakers: {}",
        event.abstract_text,
        event.speaker_line()
    ));
    ics_event.location(event.room_or(&settings.default_room));

    cal.push(ics_event.done());
    let cal = cal.done();

    rewrite_header(&cal.to_string())
}

/// Download name for a talk's calendar file.
pub fn ics_file_name(event: &EventRecord) -> String {
    format!("{}.ics", event.id)
}

fn utc_stamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

// Swaps the library PRODID for ours and drops the implied CALSCALE.
fn rewrite_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
        } else if line == "CALSCALE:GREGORIAN" {
            continue;
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }
    result
}
