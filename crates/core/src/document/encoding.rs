//! Base64 boundary for the contents API. Callers only see raw text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::StoreError;

/// Encodes document text for upload.
pub fn encode_content(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decodes downloaded content. Line breaks inserted by the API are ignored.
pub fn decode_content(encoded: &str) -> Result<String, StoreError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| StoreError::InvalidContent(format!("base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| StoreError::InvalidContent(format!("utf-8: {e}")))
}
