//! Site-wide settings shared by the public pages and the admin tools.
//!
//! Every field has a default so a partial `settings.json` still loads, and a
//! missing file falls back to [`SiteSettings::default`].

use serde::{Deserialize, Serialize};

use crate::event::DisplayZone;

/// Settings loaded from `data/settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub seminar_title: String,
    /// IANA name of the seminar's home timezone.
    pub timezone: String,
    pub contact_email: String,
    pub calendar_subscribe_url: String,
    pub mailing_list_url: String,
    /// Form-intake relay endpoint for speaker proposals.
    pub formspree_action: String,
    pub campus: String,
    pub default_room: String,
    pub repo_url: String,
    /// Domain part of calendar UIDs.
    pub calendar_uid_domain: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            seminar_title: "Modern Theory of Complex Systems & Applications".to_string(),
            timezone: "Asia/Jerusalem".to_string(),
            contact_email: "roman.gaidarov@weizmann.ac.il".to_string(),
            calendar_subscribe_url: "https://calendar.google.com/calendar/u/0?cid=REPLACE"
                .to_string(),
            mailing_list_url: "https://groups.google.com/g/REPLACE".to_string(),
            formspree_action: "https://formspree.io/f/REPLACE_WITH_YOUR_CODE".to_string(),
            campus: "Rehovot".to_string(),
            default_room: "Physics Lec. Room A".to_string(),
            repo_url: "https://github.com/USERNAME/REPO".to_string(),
            calendar_uid_domain: "complexsystems.weizmann.ac.il".to_string(),
        }
    }
}

impl SiteSettings {
    /// Parses settings JSON, filling absent fields with defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The seminar's home zone, falling back to UTC for unknown names.
    pub fn home_zone(&self) -> DisplayZone {
        DisplayZone::from_name(&self.timezone).unwrap_or(DisplayZone::Named(chrono_tz::UTC))
    }

    /// The home zone as a `chrono_tz` zone.
    pub fn home_tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}
