use std::{env, path::Path, time::Duration};

use seminar_core::settings::SiteSettings;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosting API base URL (default: "https://api.github.com")
    pub github_api_url: String,
    /// Path of the event collection document (default: "data/schedule.json")
    pub schedule_path: String,
    /// Seconds before a status message is dismissed (default: 5)
    pub status_ttl_seconds: u64,
    /// Overrides the relay endpoint from the site settings.
    pub relay_url: Option<String>,
    /// Public site URL, used for event links and the relay redirect (default: "")
    pub site_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SEMINAR_GITHUB_API_URL` - Hosting API base URL (default: "https://api.github.com")
    /// - `SEMINAR_SCHEDULE_PATH` - Event collection path (default: "data/schedule.json")
    /// - `SEMINAR_STATUS_TTL_SECONDS` - Status auto-dismiss delay (default: 5)
    /// - `SEMINAR_RELAY_URL` - Relay endpoint override (default: unset)
    /// - `SEMINAR_SITE_URL` - Public site URL (default: "")
    pub fn from_env() -> Self {
        Self {
            github_api_url: env::var("SEMINAR_GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            schedule_path: env::var("SEMINAR_SCHEDULE_PATH")
                .unwrap_or_else(|_| "data/schedule.json".to_string()),
            status_ttl_seconds: env::var("SEMINAR_STATUS_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            relay_url: env::var("SEMINAR_RELAY_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            site_url: env::var("SEMINAR_SITE_URL").unwrap_or_default(),
        }
    }

    /// Get status TTL as a Duration.
    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_seconds)
    }

    /// Relay endpoint: the override if set, otherwise the settings value.
    pub fn relay_endpoint<'a>(&'a self, settings: &'a SiteSettings) -> &'a str {
        self.relay_url
            .as_deref()
            .unwrap_or(&settings.formspree_action)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Loads site settings, falling back to defaults when the file is missing
/// or malformed.
pub fn load_settings(path: &Path) -> SiteSettings {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Settings not readable, using defaults"
            );
            return SiteSettings::default();
        }
    };

    match SiteSettings::from_json(&text) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Settings invalid, using defaults");
            SiteSettings::default()
        }
    }
}
