//! Prompt-shaped completion request.

use serde_json::Value;

use crate::media::InlineMedia;

/// One completion call: instructions, prompt text, optional media and an
/// optional JSON schema the answer must follow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// System instruction, if any.
    pub system: Option<String>,
    /// User prompt text.
    pub prompt: String,
    /// Inline media parts (e.g. a crop photo).
    pub media: Vec<InlineMedia>,
    /// JSON schema the answer must satisfy; `None` for free text.
    pub output_schema: Option<Value>,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a free-text request for `prompt`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Sets the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Attaches an inline media part.
    pub fn with_media(mut self, media: InlineMedia) -> Self {
        self.media.push(media);
        self
    }

    /// Requests structured output matching `schema`.
    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns `true` when the caller expects a JSON answer.
    pub fn expects_json(&self) -> bool {
        self.output_schema.is_some()
    }
}
