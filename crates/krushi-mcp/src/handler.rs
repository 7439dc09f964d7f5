//! Handler traits and the typed adapter.
//!
//! The registry only knows [`ActionHandler`]: JSON in, [`ActionOutput`] out.
//! Concrete flows implement the typed [`Action`] trait and are wrapped in
//! [`Typed`], which owns input parsing and output serialization.

use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use krushi_types::ActionKind;

use crate::error::HandlerError;

/// What a handler produced, before boundary normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    /// A bare string (e.g. the smart diagnosis answer).
    Text(String),
    /// Any other JSON value.
    Json(Value),
}

impl ActionOutput {
    /// Classifies a JSON value; a JSON string becomes `Text`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }

    /// Applies the boundary normalization: bare strings are wrapped as
    /// `{"response": <string>}`, everything else passes through.
    pub fn into_result(self) -> Value {
        match self {
            Self::Text(text) => json!({ "response": text }),
            Self::Json(value) => value,
        }
    }

    /// Returns the output exactly as the handler produced it.
    pub fn into_raw(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Json(value) => value,
        }
    }
}

/// Untyped async handler as stored in the registry.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Runs the handler on a raw JSON payload.
    async fn handle(&self, input: Value) -> Result<ActionOutput, HandlerError>;
}

/// A strongly typed flow or tool.
///
/// Implementors declare their name, kind and I/O types; registration is a
/// single `RegistryBuilder::register` call.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Registered action name.
    const NAME: &'static str;
    /// Flow or tool.
    const KIND: ActionKind;
    /// Parsed input payload.
    type Input: DeserializeOwned + Send;
    /// Handler result; a `String` output is treated as a bare string.
    type Output: Serialize + Send;

    /// Runs the action.
    async fn run(&self, input: Self::Input) -> Result<Self::Output, HandlerError>;
}

/// Adapter exposing an [`Action`] as an [`ActionHandler`].
pub struct Typed<A>(pub A);

impl<A> Typed<A> {
    /// Wraps `action`.
    pub fn new(action: A) -> Self {
        Self(action)
    }
}

#[async_trait]
impl<A: Action> ActionHandler for Typed<A> {
    async fn handle(&self, input: Value) -> Result<ActionOutput, HandlerError> {
        let parsed: A::Input =
            serde_json::from_value(input).map_err(|e| HandlerError::InvalidInput(e.to_string()))?;
        let output = self.0.run(parsed).await?;
        let value = serde_json::to_value(output)
            .map_err(|e| HandlerError::message(format!("failed to serialize output: {e}")))?;
        Ok(ActionOutput::from_value(value))
    }
}

/// Handler built from an async closure.
pub struct FnHandler<F>(F);

/// Wraps an async closure as an [`ActionHandler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionOutput, HandlerError>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionOutput, HandlerError>> + Send + 'static,
{
    async fn handle(&self, input: Value) -> Result<ActionOutput, HandlerError> {
        (self.0)(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Greeting {
        name: String,
    }

    struct Greet;

    #[async_trait]
    impl Action for Greet {
        const NAME: &'static str = "greet";
        const KIND: ActionKind = ActionKind::Tool;
        type Input = Greeting;
        type Output = String;

        async fn run(&self, input: Greeting) -> Result<String, HandlerError> {
            Ok(format!("namaste {}", input.name))
        }
    }

    #[test]
    fn string_value_becomes_text() {
        assert_eq!(
            ActionOutput::from_value(json!("hi")),
            ActionOutput::Text("hi".into())
        );
        assert_eq!(
            ActionOutput::from_value(json!({"a": 1})),
            ActionOutput::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn text_is_wrapped_as_response() {
        let out = ActionOutput::Text("Likely nitrogen deficiency".into()).into_result();
        assert_eq!(out, json!({"response": "Likely nitrogen deficiency"}));
    }

    #[test]
    fn json_passes_through() {
        let out = ActionOutput::Json(json!({"disease": "Blight"})).into_result();
        assert_eq!(out, json!({"disease": "Blight"}));
    }

    #[test]
    fn raw_keeps_bare_string() {
        assert_eq!(ActionOutput::Text("x".into()).into_raw(), json!("x"));
    }

    #[tokio::test]
    async fn typed_adapter_parses_and_classifies() {
        let out = Typed::new(Greet)
            .handle(json!({"name": "Asha"}))
            .await
            .expect("handle");
        assert_eq!(out, ActionOutput::Text("namaste Asha".into()));
    }

    #[tokio::test]
    async fn typed_adapter_rejects_bad_input() {
        let err = Typed::new(Greet)
            .handle(json!({"nom": "Asha"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, HandlerError::InvalidInput(_)));
        assert!(err.to_string().contains("name"));
    }

    #[tokio::test]
    async fn closure_handler_runs() {
        let h = handler_fn(|input: Value| async move { Ok::<_, HandlerError>(ActionOutput::Json(input)) });
        let out = h.handle(json!({"k": 1})).await.expect("handle");
        assert_eq!(out, ActionOutput::Json(json!({"k": 1})));
    }
}
