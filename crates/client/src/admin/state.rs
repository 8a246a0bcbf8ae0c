use std::fmt;

use serde::Serialize;

/// Where an admin session is in the load/edit/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminState {
    #[default]
    Disconnected,
    /// Credentials probed successfully, nothing loaded.
    Connected,
    /// Buffer matches the last read or save.
    Loaded,
    /// Buffer has unsaved changes.
    Editing,
    /// A write is in flight.
    Saving,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminState::Disconnected => "disconnected",
            AdminState::Connected => "connected",
            AdminState::Loaded => "loaded",
            AdminState::Editing => "editing",
            AdminState::Saving => "saving",
        }
    }

    /// True when the save control should be enabled.
    pub fn can_save(&self) -> bool {
        matches!(self, AdminState::Editing)
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
