//! Prompt helpers shared by the flows.

use krushi_completion::{parse_data_uri, CompletionError, CompletionRequest};
use krushi_mcp::HandlerError;

use crate::language;

const SYSTEM_PROMPT: &str = "You are KrushiMitra, a practical agricultural assistant for \
small and marginal farmers in India. Give concrete, locally relevant advice, prefer \
low-cost measures, mention safety precautions for any chemical, and say so plainly when \
you are unsure.";

/// Starts a request with the shared system prompt and a language instruction.
pub(crate) fn request(prompt: String, language: Option<&str>) -> CompletionRequest {
    let language = language::resolve(language);
    CompletionRequest::new(format!("{prompt}\n\nAnswer in {language}."))
        .with_system(SYSTEM_PROMPT)
}

/// Rejects empty or whitespace-only required fields.
pub(crate) fn require(field: &str, value: &str) -> Result<(), HandlerError> {
    if value.trim().is_empty() {
        return Err(HandlerError::invalid_input(format!("`{field}` must not be empty")));
    }
    Ok(())
}

/// Attaches an optional photo given as a data URI.
pub(crate) fn with_photo(
    request: CompletionRequest,
    photo_data_uri: Option<&str>,
) -> Result<CompletionRequest, HandlerError> {
    match photo_data_uri.filter(|s| !s.trim().is_empty()) {
        Some(uri) => {
            let media = parse_data_uri(uri)
                .map_err(|e| HandlerError::invalid_input(format!("`photoDataUri`: {e}")))?;
            Ok(request.with_media(media))
        }
        None => Ok(request),
    }
}

/// Maps a completion failure to a handler failure with the same message.
pub(crate) fn upstream(e: CompletionError) -> HandlerError {
    HandlerError::upstream(e)
}

/// Appends `label: value` when `value` is present and non-empty.
pub(crate) fn push_line(prompt: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        prompt.push_str(&format!("\n{label}: {v}"));
    }
}
