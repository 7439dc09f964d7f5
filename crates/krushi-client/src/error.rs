//! Client error types.

use krushi_types::{DiagnosticError, ErrorKind, KrushiError};
use thiserror::Error;

/// Errors returned by [`crate::McpClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    ///
    /// `body` holds the `error` message (and `details`, if any) when the
    /// body is an error envelope, else the raw body text.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// A 2xx body carried an `error` field.
    #[error("{error}")]
    Server {
        error: String,
        details: Option<String>,
    },
    /// The body was not the expected JSON shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<ClientError> for KrushiError {
    fn from(e: ClientError) -> Self {
        let kind = match &e {
            ClientError::Transport(err) if err.is_timeout() => ErrorKind::Timeout,
            ClientError::Status { status, .. } if (400..500).contains(status) => {
                ErrorKind::InvalidInput
            }
            ClientError::Transport(_) | ClientError::Status { .. } | ClientError::Server { .. } => {
                ErrorKind::Upstream
            }
            ClientError::Decode(_) => ErrorKind::Internal,
        };
        KrushiError::new(kind, e.to_string())
    }
}

impl DiagnosticError for ClientError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Transport(_) => Some("is the KrushiMitra server running?".into()),
            Self::Status { status: 401, .. } => Some("the server requires a bearer token".into()),
            Self::Status { status: 404, .. } => Some("the endpoint path may be wrong".into()),
            Self::Server { details: Some(d), .. } => Some(d.clone()),
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Transport(_) => Some("start it with `krushi serve` or pass --endpoint".into()),
            Self::Status { status: 401, .. } => Some("pass --token or set KRUSHI_TOKEN".into()),
            _ => None,
        }
    }
}
