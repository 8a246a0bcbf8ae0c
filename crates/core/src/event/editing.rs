//! Whole-document operations on the admin edit buffer.
//!
//! The buffer is raw JSON text; each operation parses it, transforms it and
//! pretty-prints it back.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Value};

use super::error::EditError;
use super::types::parse_event_datetime;
use crate::settings::SiteSettings;

/// Pretty-prints JSON with two-space indentation. Key order is preserved.
pub fn format_json(text: &str) -> Result<String, EditError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Checks that the buffer is syntactically valid JSON.
pub fn parse_json(text: &str) -> Result<Value, EditError> {
    Ok(serde_json::from_str(text)?)
}

/// Sorts the event array by start instant, soonest first.
///
/// The sort is stable; records whose datetime does not parse keep their
/// relative order after all dated records.
pub fn sort_by_datetime(text: &str) -> Result<String, EditError> {
    let mut value: Value = serde_json::from_str(text)?;
    let items = value.as_array_mut().ok_or(EditError::NotAnArray)?;

    items.sort_by_key(|item| {
        let instant = item
            .get("datetime")
            .and_then(Value::as_str)
            .and_then(parse_event_datetime)
            .map(|dt| dt.with_timezone(&Utc));
        (instant.is_none(), instant)
    });

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Builds a placeholder record one week after `now`, in the seminar's
/// timezone.
pub fn event_template(now: DateTime<Utc>, settings: &SiteSettings) -> Value {
    let start = (now + Duration::days(7)).with_timezone(&settings.home_tz());
    json!({
        "id": format!("{}-new-event", now.format("%Y-%m-%d")),
        "title": "New Event Title",
        "speakers": ["Speaker Name"],
        "affiliation": "Weizmann Institute of Science",
        "datetime": start.fixed_offset().to_rfc3339_opts(SecondsFormat::Secs, false),
        "duration_min": 120,
        "room": settings.default_room,
        "level": "intro",
        "tags": ["new topic"],
        "abstract": "Event abstract goes here...",
        "references": []
    })
}

/// Appends [`event_template`] to the event array.
pub fn append_event_template(
    text: &str,
    now: DateTime<Utc>,
    settings: &SiteSettings,
) -> Result<String, EditError> {
    let mut value: Value = serde_json::from_str(text)?;
    value
        .as_array_mut()
        .ok_or(EditError::NotAnArray)?
        .push(event_template(now, settings));
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Last path component, e.g. `schedule.json` for `data/schedule.json`.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Commit message used when the operator leaves it blank.
pub fn default_commit_message(path: &str) -> String {
    format!("chore({}): update", file_name(path))
}

/// Download name for a buffer backup, e.g.
/// `backup-data-schedule.json-2024-03-14.json`.
pub fn backup_file_name(path: Option<&str>, date: NaiveDate) -> String {
    let stem = path
        .filter(|p| !p.is_empty())
        .map(|p| p.replace('/', "-"))
        .unwrap_or_else(|| "data".to_string());
    format!("backup-{}-{}.json", stem, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::validate_schedule;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_format_json_round_trip() {
        let text = r#"[{"id":"e1","title":"T","nested":{"b":1,"a":[1,2,3]}},{"id":"e2"}]"#;
        let formatted = format_json(text).unwrap();

        assert!(formatted.contains("\n  {"));
        let before: Value = serde_json::from_str(text).unwrap();
        let after: Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_format_json_preserves_key_order() {
        let formatted = format_json(r#"{"title":"T","id":"e1"}"#).unwrap();
        assert!(formatted.find("title").unwrap() < formatted.find("id").unwrap());
    }

    #[test]
    fn test_format_invalid_json() {
        assert!(matches!(
            format_json("[{"),
            Err(EditError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_sort_by_datetime() {
        let text = r#"[
            {"id": "c", "datetime": "2024-06-01T10:00:00+03:00"},
            {"id": "x", "datetime": "whenever"},
            {"id": "a", "datetime": "2024-01-01T10:00:00+02:00"},
            {"id": "b", "datetime": "2024-03-01T09:00:00+00:00"}
        ]"#;
        let sorted: Value = serde_json::from_str(&sort_by_datetime(text).unwrap()).unwrap();
        let ids: Vec<&str> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn test_sort_requires_array() {
        assert!(matches!(
            sort_by_datetime(r#"{"id": "e1"}"#),
            Err(EditError::NotAnArray)
        ));
    }

    #[test]
    fn test_template_is_a_valid_event() {
        let settings = SiteSettings::default();
        let text = append_event_template("[]", now(), &settings).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        let records = validate_schedule(&value).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2024-03-14-new-event");
        assert_eq!(records[0].room.as_deref(), Some("Physics Lec. Room A"));
        assert_eq!(records[0].starts_at(), now() + Duration::days(7));
    }

    #[test]
    fn test_template_uses_home_offset() {
        let template = event_template(now(), &SiteSettings::default());
        // Jerusalem is on +02:00 until the end of March
        assert_eq!(template["datetime"], "2024-03-21T11:30:00+02:00");
    }

    #[test]
    fn test_append_requires_array() {
        let settings = SiteSettings::default();
        assert!(matches!(
            append_event_template("{}", now(), &settings),
            Err(EditError::NotAnArray)
        ));
    }

    #[test]
    fn test_commit_message_and_backup_name() {
        assert_eq!(
            default_commit_message("data/schedule.json"),
            "chore(schedule.json): update"
        );
        assert_eq!(file_name("settings.json"), "settings.json");

        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(
            backup_file_name(Some("data/schedule.json"), date),
            "backup-data-schedule.json-2024-03-14.json"
        );
        assert_eq!(backup_file_name(None, date), "backup-data-2024-03-14.json");
    }
}
