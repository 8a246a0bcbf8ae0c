//! Pure functions for classifying hosting API responses.

use serde_json::Value;

use super::StoreError;

/// Maps a non-success HTTP status to a [`StoreError`].
///
/// - 401, 403 -> `AuthFailure`
/// - 404 -> `NotFound`
/// - 409, 422 -> `Conflict` (stale version token)
/// - anything else -> `Transport`
///
/// # Examples
///
/// ```
/// use seminar_core::document::{status_to_store_error, StoreError};
///
/// let error = status_to_store_error(409, "data/schedule.json", "sha mismatch");
/// assert!(error.is_conflict());
/// ```
pub fn status_to_store_error(status: u16, path: &str, message: impl Into<String>) -> StoreError {
    let message = message.into();
    match status {
        401 | 403 => StoreError::AuthFailure { status, message },
        404 => StoreError::NotFound {
            path: path.to_string(),
        },
        409 | 422 => StoreError::Conflict {
            path: path.to_string(),
            message,
        },
        _ => StoreError::Transport(format!("HTTP {status}: {message}")),
    }
}

/// Extracts the `message` field of an API error body, falling back to the
/// raw text.
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
