//! Inline media parts carried alongside a prompt.

use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Base64-encoded media with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineMedia {
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Base64 payload, without the data-URI prefix.
    pub data: String,
}

/// Parses a `data:<mime>;base64,<payload>` URI into an [`InlineMedia`].
///
/// # Errors
///
/// Returns `CompletionError::InvalidMedia` if the URI is not a base64
/// data URI or has an empty MIME type or payload.
pub fn parse_data_uri(uri: &str) -> Result<InlineMedia, CompletionError> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| CompletionError::InvalidMedia("expected a data: URI".into()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| CompletionError::InvalidMedia("data URI has no payload".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| CompletionError::InvalidMedia("data URI must be base64-encoded".into()))?;
    if mime_type.is_empty() {
        return Err(CompletionError::InvalidMedia("data URI has no MIME type".into()));
    }
    if data.is_empty() {
        return Err(CompletionError::InvalidMedia("data URI payload is empty".into()));
    }
    Ok(InlineMedia {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
    })
}
