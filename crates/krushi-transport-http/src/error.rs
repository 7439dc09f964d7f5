//! Error types for the HTTP transport.

use krushi_types::{DiagnosticError, ErrorKind, KrushiError};
use thiserror::Error;

/// Errors that can occur while running the HTTP server.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The endpoint path cannot be mounted.
    #[error("invalid endpoint path: {0}")]
    InvalidPath(String),
    /// The server hit an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
}

impl From<HttpTransportError> for KrushiError {
    fn from(e: HttpTransportError) -> Self {
        let kind = match e {
            HttpTransportError::InvalidPath(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Internal,
        };
        KrushiError::new(kind, e.to_string())
    }
}

impl DiagnosticError for HttpTransportError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Bind { .. } => Some("another process may already use this port".into()),
            Self::InvalidPath(_) => {
                Some("the endpoint path is a literal route next to /health and /health/ready".into())
            }
            Self::Serve(_) => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Bind { .. } => Some("pick a free port with `krushi serve --port <PORT>`".into()),
            Self::InvalidPath(_) => Some("use a path such as `--path /api/mcp`".into()),
            Self::Serve(_) => None,
        }
    }
}
