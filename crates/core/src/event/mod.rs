mod display;
mod editing;
mod error;
mod schedule;
mod types;
mod validation;

pub use display::{
    abstract_preview, format_datetime, format_duration, DisplayZone, ABSTRACT_PREVIEW_CHARS,
};
pub use editing::{
    append_event_template, backup_file_name, default_commit_message, event_template, file_name,
    format_json, parse_json, sort_by_datetime,
};
pub use error::{EditError, RecordError, ScheduleError, ValidationError};
pub use schedule::{
    collect_topics, filter_events, find_event, is_upcoming, next_upcoming, partition_events,
    render, ScheduleCriteria, ScheduleView,
};
pub use types::{parse_event_datetime, EventRecord, Level, Reference};
pub use validation::{parse_schedule, validate_record, validate_schedule, REQUIRED_FIELDS};
