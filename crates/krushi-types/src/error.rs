//! Error classification shared by every KrushiMitra crate.
//!
//! Each crate keeps its own `thiserror` enum and converts it into
//! [`KrushiError`] at the edge, where the [`ErrorKind`] decides how the
//! failure is surfaced (the CLI derives its exit status from it).

use std::fmt;

/// Broad class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested action is not registered.
    NotFound,
    /// The request, handler input, or configuration is malformed.
    InvalidInput,
    /// A downstream service (completion, weather, remote endpoint) failed.
    Upstream,
    /// A downstream service did not answer in time.
    Timeout,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Returns `true` for kinds the caller can fix by changing the request.
    pub fn is_client_error(self) -> bool {
        matches!(self, Self::NotFound | Self::InvalidInput)
    }

    /// Short lowercase label used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::InvalidInput => "invalid input",
            Self::Upstream => "upstream failure",
            Self::Timeout => "timed out",
            Self::Internal => "internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with an optional note on where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrushiError {
    pub kind: ErrorKind,
    pub message: String,
    /// Where the failure happened, e.g. `action: askAnything`.
    pub context: Option<String>,
}

impl KrushiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidInput`] error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Attaches `context`, replacing any earlier one.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for KrushiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{}: {} [{ctx}]", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for KrushiError {}

/// Operator-facing explanation of an error.
///
/// `hint` names the likely cause, `fix` a concrete step (a flag, a config
/// key, an environment variable). Both default to nothing.
pub trait DiagnosticError {
    fn hint(&self) -> Option<String> {
        None
    }

    fn fix(&self) -> Option<String> {
        None
    }
}
