use chrono::{DateTime, Local, TimeZone};
use chrono_tz::Tz;

/// Timezone used when rendering talk times. Filtering and ordering never
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// A fixed IANA zone, normally the seminar's home timezone.
    Named(Tz),
    /// The viewer's local zone.
    Local,
}

impl DisplayZone {
    /// Parses an IANA zone name such as `Asia/Jerusalem`.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(DisplayZone::Named)
    }

    /// Short label for headers.
    pub fn label(&self) -> String {
        match self {
            DisplayZone::Named(tz) => tz.name().to_string(),
            DisplayZone::Local => "local time".to_string(),
        }
    }
}

const DATETIME_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

/// Formats an instant for display in the given zone, e.g.
/// `Thursday, January 1, 2099 at 10:00 AM`.
pub fn format_datetime<Z: TimeZone>(instant: &DateTime<Z>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Named(tz) => instant.with_timezone(&tz).format(DATETIME_FORMAT).to_string(),
        DisplayZone::Local => instant
            .with_timezone(&Local)
            .format(DATETIME_FORMAT)
            .to_string(),
    }
}

/// Formats a duration in minutes as `2h`, `1h 30m` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Abstracts longer than this are collapsed in previews.
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// Returns the abstract, cut at a character boundary with an ellipsis when
/// longer than [`ABSTRACT_PREVIEW_CHARS`].
pub fn abstract_preview(text: &str) -> String {
    if text.chars().count() <= ABSTRACT_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(ABSTRACT_PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}
