//! Thin async client for `GET`/`POST <mcp-endpoint>`.
//!
//! No retries and no timeout policy beyond what the caller configures on
//! the underlying `reqwest::Client`.

use reqwest::{header, Response};
use serde_json::Value;
use tracing::debug;

use krushi_protocol::{ActionRequest, ServerInfo};

use crate::error::ClientError;

/// Client for one MCP endpoint URL.
#[derive(Debug, Clone)]
pub struct McpClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl McpClient {
    /// Creates a client for `endpoint` (e.g. `http://localhost:9002/api/mcp`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, endpoint))
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// The URL every request is sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the server name, version, and action listing.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure, a non-2xx status, or a
    /// body that is not a `ServerInfo`.
    pub async fn get_server_info(&self) -> Result<ServerInfo, ClientError> {
        let resp = self.authorized(self.http.get(&self.endpoint)).send().await?;
        let body = Self::checked_body(resp).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Runs a flow and returns its `result` payload.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn call_flow(&self, name: &str, input: Value) -> Result<Value, ClientError> {
        self.call(name, input).await
    }

    /// Runs a tool and returns its `result` payload.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn call_tool(&self, name: &str, input: Value) -> Result<Value, ClientError> {
        self.call(name, input).await
    }

    /// Posts `{action, input}` and returns the `result` payload.
    ///
    /// Flows and tools share this request shape; the server does not
    /// distinguish them.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Server` when a 2xx body carries `error`,
    /// `ClientError::Status` for non-2xx answers, and `ClientError::Decode`
    /// when the body has neither `result` nor `error`.
    pub async fn call(&self, action: &str, input: Value) -> Result<Value, ClientError> {
        debug!(endpoint = %self.endpoint, action, "calling action");
        let request = ActionRequest::new(action, input);
        let resp = self
            .authorized(self.http.post(&self.endpoint))
            .json(&request)
            .send()
            .await?;
        let mut body = Self::checked_body(resp).await?;
        if let Some(error) = body.get("error") {
            return Err(ClientError::Server {
                error: text(error),
                details: body.get("details").map(text),
            });
        }
        body.get_mut("result")
            .map(Value::take)
            .ok_or_else(|| ClientError::Decode("body has neither `result` nor `error`".into()))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Reads the body, turning non-2xx statuses into `ClientError::Status`.
    async fn checked_body(resp: Response) -> Result<Value, ClientError> {
        let status = resp.status();
        let raw = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: status_message(&raw),
            });
        }
        serde_json::from_str(&raw).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Pulls `error` (and `details`) out of an error envelope, else returns
/// the raw text.
fn status_message(raw: &str) -> String {
    let Ok(body) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };
    match (body.get("error"), body.get("details")) {
        (Some(error), Some(details)) => format!("{} ({})", text(error), text(details)),
        (Some(error), None) => text(error),
        _ => raw.to_string(),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
