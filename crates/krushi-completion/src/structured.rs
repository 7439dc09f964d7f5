//! Structured (JSON) output on top of a free-text completion service.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CompletionError;
use crate::request::CompletionRequest;
use crate::CompletionService;

/// Returns the JSON schema of `T` as a plain JSON value.
pub fn output_schema<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

/// Strips Markdown code fences and surrounding prose from a model answer,
/// returning the slice most likely to be the JSON document.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(fenced) = trimmed.strip_prefix("```") {
        // Drop the info string (```json) up to the first newline.
        let body = fenced.split_once('\n').map_or("", |(_, rest)| rest);
        let body = body.trim_end();
        return body.strip_suffix("```").unwrap_or(body).trim();
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Asks the service for JSON matching `T`'s schema and parses the answer.
///
/// The schema is attached to the request and spelled out in the prompt so
/// that providers without native schema support still see it.
///
/// # Errors
///
/// Propagates any `CompletionError` from the service, and returns
/// `CompletionError::InvalidOutput` if the answer does not deserialize
/// into `T`.
#[tracing::instrument(skip_all, fields(output = std::any::type_name::<T>()))]
pub async fn generate_structured<T>(
    service: &dyn CompletionService,
    mut request: CompletionRequest,
) -> Result<T, CompletionError>
where
    T: JsonSchema + DeserializeOwned,
{
    let schema = output_schema::<T>();
    request.prompt.push_str(
        "\n\nRespond with a single JSON object only, no prose, matching this JSON schema:\n",
    );
    request.prompt.push_str(&schema.to_string());

    let text = service.complete(request.with_output_schema(schema)).await?;
    let json = extract_json(&text);
    serde_json::from_str(json).map_err(|e| {
        tracing::warn!(error = %e, "completion output did not match schema");
        CompletionError::InvalidOutput(e.to_string())
    })
}
