use url::Url;

use crate::event::EventRecord;
use crate::settings::SiteSettings;

pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// "Add to Google Calendar" link for a talk.
pub fn google_calendar_url(
    event: &EventRecord,
    settings: &SiteSettings,
) -> Result<Url, url::ParseError> {
    let dates = format!(
        "{}/{}",
        event.starts_at().format("%Y%m%dT%H%M%SZ"),
        event.ends_at().format("%Y%m%dT%H%M%SZ")
    );
    let details = format!("{}\n\nSpeakers: {}", event.abstract_text, event.speaker_line());

    Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", details.as_str()),
            ("location", event.room_or(&settings.default_room)),
            ("ctz", settings.timezone.as_str()),
        ],
    )
}

/// Shareable link to a talk on the schedule page.
pub fn event_link(site_url: &str, id: &str) -> String {
    let base = site_url.split('#').next().unwrap_or(site_url);
    format!("{base}#{id}")
}
