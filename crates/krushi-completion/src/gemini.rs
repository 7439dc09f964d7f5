//! Gemini `generateContent` REST client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::CompletionError;
use crate::request::CompletionRequest;
use crate::CompletionService;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL, without a trailing path.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API key; requests fail with `MissingApiKey` when absent.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default sampling temperature.
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            temperature: 0.4,
        }
    }
}

/// Completion service backed by the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::Transport` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Full URL of the `generateContent` call for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Builds the JSON request body for `request`.
    pub fn build_body(&self, request: &CompletionRequest) -> Value {
        let mut parts = vec![json!({ "text": request.prompt })];
        parts.extend(request.media.iter().map(|m| {
            json!({ "inlineData": { "mimeType": m.mime_type, "data": m.data } })
        }));

        let mut generation = json!({
            "temperature": request.temperature.unwrap_or(self.config.temperature),
        });
        if request.expects_json() {
            generation["responseMimeType"] = json!("application/json");
        }

        let mut body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation,
        });
        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        body
    }
}

/// Concatenates the text parts of the first candidate.
pub fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.config.model, json = request.expects_json()))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;
        let body = self.build_body(&request);

        debug!(media = request.media.len(), "sending completion request");
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("completion provider rate limited the request");
            return Err(CompletionError::RateLimited);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let value: Value = resp.json().await?;
        extract_text(&value).ok_or(CompletionError::EmptyResponse)
    }
}
