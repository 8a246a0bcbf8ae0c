//! Pretty output formatting.

use seminar_core::event::{
    abstract_preview, format_datetime, format_duration, DisplayZone, EventRecord, RecordError,
    ScheduleView,
};
use seminar_core::settings::SiteSettings;
use seminar_core::submission::{AbstractCue, AbstractStats, SubmissionReport};

use crate::admin::LoadedDocument;

/// Format an event for display.
pub fn format_event(event: &EventRecord, zone: DisplayZone, settings: &SiteSettings) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  When: {} ({})\n  Duration: {}\n  Room: {}",
        event.title,
        event.level.label(),
        event.id,
        format_datetime(&event.datetime, zone),
        zone.label(),
        format_duration(event.duration_min),
        event.room_or(&settings.default_room),
    );
    if !event.speakers.is_empty() {
        output.push_str(&format!("\n  Speakers: {}", event.speaker_line()));
    }
    if !event.affiliation.is_empty() {
        output.push_str(&format!("\n  Affiliation: {}", event.affiliation));
    }
    if !event.tags.is_empty() {
        output.push_str(&format!("\n  Tags: {}", event.tags.join(", ")));
    }
    if !event.abstract_text.is_empty() {
        output.push_str(&format!("\n  Abstract: {}", abstract_preview(&event.abstract_text)));
    }
    for reference in &event.references {
        output.push_str(&format!("\n  Reference: {} <{}>", reference.label, reference.url));
    }
    output
}

fn format_section(
    title: &str,
    events: &[&EventRecord],
    zone: DisplayZone,
    settings: &SiteSettings,
) -> String {
    let mut output = format!("{} ({})\n", title, events.len());
    output.push_str(&"-".repeat(40));
    if events.is_empty() {
        output.push_str("\nNo events found.\n");
    }
    for event in events {
        output.push_str(&format!("\n{}", format_event(event, zone, settings)));
        output.push('\n');
    }
    output
}

/// Format a rendered schedule for display.
pub fn format_schedule(
    view: &ScheduleView<'_>,
    zone: DisplayZone,
    settings: &SiteSettings,
) -> String {
    format!(
        "{}\n{}",
        format_section("UPCOMING", &view.upcoming, zone, settings),
        format_section("PAST", &view.past, zone, settings)
    )
}

/// Format record validation failures, one line each.
pub fn format_record_errors(errors: &[RecordError]) -> String {
    let mut output = format!("INVALID EVENTS ({})\n", errors.len());
    output.push_str(&"-".repeat(40));
    for error in errors {
        output.push_str(&format!("\n{}", error));
    }
    output
}

/// Format a submission check.
pub fn format_report(report: &SubmissionReport, stats: AbstractStats) -> String {
    let cue = match stats.cue() {
        AbstractCue::Ideal => "ideal",
        AbstractCue::Acceptable => "acceptable",
        AbstractCue::OutOfBounds => "too long",
    };
    let mut output = format!("Abstract: {} ({})", stats, cue);
    for error in &report.errors {
        output.push_str(&format!("\n  error [{}]: {}", error.field(), error));
    }
    for warning in &report.warnings {
        output.push_str(&format!("\n  warning: {}", warning));
    }
    output
}

/// Format the loaded document header.
pub fn format_document(document: &LoadedDocument) -> String {
    let mut output = format!(
        "{}\n  Version: {}\n  Size: {} bytes",
        document.path, document.version, document.size
    );
    if let Some(modified) = document.last_modified {
        output.push_str(&format!("\n  Last modified: {}", modified.to_rfc2822()));
    }
    output
}
