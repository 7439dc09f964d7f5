//! Error types for handlers, registry construction, and dispatch.

use krushi_types::{DiagnosticError, ErrorKind, KrushiError};
use thiserror::Error;

/// Failure raised by a single handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The payload did not match the handler's input type.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A downstream service failed; the message is the service's own.
    #[error("{0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Any other failure, carried as a bare message.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Wraps a downstream error, keeping its message verbatim.
    pub fn upstream(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Box::new(e))
    }

    /// Creates a failure from a plain message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Creates an invalid-input failure.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Errors from building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The same name was registered twice.
    #[error("action '{name}' is registered more than once")]
    Duplicate {
        /// The duplicated name.
        name: String,
    },
    /// The name is not a valid action identifier.
    #[error("invalid action name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors from dispatching one action.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is registered under this name.
    #[error("unknown action: {name}")]
    UnknownAction {
        /// The offending name.
        name: String,
    },
    /// The handler ran and failed.
    #[error("action '{action}' failed: {source}")]
    HandlerFailure {
        /// The action that failed.
        action: String,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// The underlying handler message, if this is a handler failure.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::UnknownAction { .. } => None,
            Self::HandlerFailure { source, .. } => Some(source.to_string()),
        }
    }
}

impl From<DispatchError> for KrushiError {
    fn from(e: DispatchError) -> Self {
        let kind = match &e {
            DispatchError::UnknownAction { .. } => ErrorKind::NotFound,
            DispatchError::HandlerFailure {
                source: HandlerError::InvalidInput(_),
                ..
            } => ErrorKind::InvalidInput,
            DispatchError::HandlerFailure {
                source: HandlerError::Upstream(_),
                ..
            } => ErrorKind::Upstream,
            DispatchError::HandlerFailure { .. } => ErrorKind::Internal,
        };
        KrushiError::new(kind, e.to_string())
    }
}

impl From<RegistryError> for KrushiError {
    fn from(e: RegistryError) -> Self {
        KrushiError::new(ErrorKind::Internal, e.to_string())
    }
}

impl DiagnosticError for DispatchError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownAction { name } => {
                Some(format!("No flow or tool named '{name}' is registered."))
            }
            Self::HandlerFailure {
                source: HandlerError::InvalidInput(_),
                ..
            } => Some("The input payload does not match what the action expects.".into()),
            Self::HandlerFailure { .. } => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::UnknownAction { .. } => Some("List available actions: krushi actions".into()),
            _ => None,
        }
    }
}

impl DiagnosticError for RegistryError {
    fn hint(&self) -> Option<String> {
        Some("Action names must be unique and start with an ASCII letter.".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_displays_verbatim() {
        assert_eq!(HandlerError::message("rate limited").to_string(), "rate limited");
    }

    #[test]
    fn upstream_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        assert_eq!(HandlerError::upstream(io).to_string(), "connection reset");
    }

    #[test]
    fn details_carry_handler_message() {
        let e = DispatchError::HandlerFailure {
            action: "askAnything".into(),
            source: HandlerError::message("rate limited"),
        };
        assert_eq!(e.details().as_deref(), Some("rate limited"));
        assert!(DispatchError::UnknownAction { name: "x".into() }
            .details()
            .is_none());
    }

    #[test]
    fn unknown_action_maps_to_not_found() {
        let err: KrushiError = DispatchError::UnknownAction { name: "x".into() }.into();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn invalid_input_maps_to_invalid_input() {
        let err: KrushiError = DispatchError::HandlerFailure {
            action: "a".into(),
            source: HandlerError::invalid_input("missing field `text`"),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn unknown_action_has_fix() {
        let e = DispatchError::UnknownAction { name: "x".into() };
        assert!(e.fix().expect("fix").contains("krushi actions"));
    }
}
