//! Calendar export for single talks: `.ics` bodies and share links.

mod ics;
mod links;

pub use ics::{generate_ics, ics_file_name};
pub use links::{event_link, google_calendar_url, GOOGLE_CALENDAR_RENDER_URL};
