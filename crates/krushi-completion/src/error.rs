//! Completion-service error types.

use krushi_types::{DiagnosticError, ErrorKind, KrushiError};
use thiserror::Error;

/// Errors from the completion service and its output parsing.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key was configured for a provider that needs one.
    #[error("completion API key is not configured")]
    MissingApiKey,
    /// The HTTP request could not be sent or its body not read.
    #[error("completion request failed: {0}")]
    Transport(String),
    /// The provider rejected the request for exceeding its quota.
    #[error("rate limited")]
    RateLimited,
    /// The provider answered with a non-success status.
    #[error("completion service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (possibly truncated).
        body: String,
    },
    /// The provider answered without any text candidate.
    #[error("completion service returned no text")]
    EmptyResponse,
    /// The answer could not be parsed into the requested output type.
    #[error("unparseable completion output: {0}")]
    InvalidOutput(String),
    /// An attached media payload was malformed.
    #[error("invalid media: {0}")]
    InvalidMedia(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<CompletionError> for KrushiError {
    fn from(e: CompletionError) -> Self {
        let kind = match &e {
            CompletionError::InvalidMedia(_) => ErrorKind::InvalidInput,
            CompletionError::MissingApiKey => ErrorKind::Internal,
            CompletionError::Transport(msg) if msg.contains("timed out") => ErrorKind::Timeout,
            _ => ErrorKind::Upstream,
        };
        KrushiError::new(kind, e.to_string())
    }
}

impl DiagnosticError for CompletionError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::MissingApiKey => Some("No key was found for the completion provider.".into()),
            Self::RateLimited => Some("The completion provider's request quota is exhausted.".into()),
            Self::InvalidOutput(_) => {
                Some("The model answered with text that does not match the expected JSON.".into())
            }
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::MissingApiKey => {
                Some("Set GEMINI_API_KEY or [completion] api_key in the config file.".into())
            }
            Self::RateLimited => Some("Wait before retrying or raise the provider quota.".into()),
            _ => None,
        }
    }
}
