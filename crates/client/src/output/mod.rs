//! Output formatting for CLI results.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Serializes a value for commands without a dedicated pretty layout.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}
