//! Request and response envelopes for `POST <mcp-endpoint>`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound dispatch request.
///
/// `action`/`input` are preferred; `method`/`params` are accepted as legacy
/// aliases with identical meaning. When both spellings are present the
/// preferred one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action name (preferred spelling).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Action name (legacy alias).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Handler payload (preferred spelling).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Handler payload (legacy alias).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl ActionRequest {
    /// Creates a request using the preferred field names.
    pub fn new(action: impl Into<String>, input: Value) -> Self {
        Self {
            action: Some(action.into()),
            input: Some(input),
            ..Self::default()
        }
    }

    /// Resolves the action name. Empty strings count as absent.
    pub fn action_name(&self) -> Option<&str> {
        [self.action.as_deref(), self.method.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
    }

    /// Resolves the handler payload, defaulting to an empty object.
    pub fn payload(&self) -> Value {
        self.input
            .clone()
            .or_else(|| self.params.clone())
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// Successful dispatch body: `{ "result": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Handler output after boundary normalization.
    pub result: Value,
}

/// Error body: `{ "error": ..., "details"?: ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    /// Short, stable error message.
    pub error: String,
    /// Underlying failure message, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActionError {
    /// Creates an error body without details.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Attaches a details message.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
