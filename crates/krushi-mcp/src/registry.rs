//! The action registry: an immutable map from name to handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use krushi_protocol::{ActionList, ServerInfo, SERVER_NAME};
use krushi_types::{ActionKind, ActionName};

use crate::error::{DispatchError, RegistryError};
use crate::handler::{Action, ActionHandler, ActionOutput, Typed};
use crate::metrics::DispatchMetrics;

struct Entry {
    kind: ActionKind,
    handler: Arc<dyn ActionHandler>,
}

/// Immutable name → handler map with a uniform call contract.
///
/// Built once through [`RegistryBuilder`]; cheap to share behind an `Arc`.
/// Handlers hold no per-call state, so concurrent dispatches of the same
/// action never interfere.
pub struct ActionRegistry {
    entries: BTreeMap<String, Entry>,
    metrics: Arc<DispatchMetrics>,
}

impl ActionRegistry {
    /// Starts a new registry definition.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registered names split by kind, each list sorted.
    pub fn list_actions(&self) -> ActionList {
        let mut list = ActionList::default();
        for (name, entry) in &self.entries {
            match entry.kind {
                ActionKind::Flow => list.flows.push(name.clone()),
                ActionKind::Tool => list.tools.push(name.clone()),
            }
        }
        list
    }

    /// Server identity plus the current action list.
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), self.list_actions())
    }

    /// Returns the kind of `name`, or `None` if it is not registered.
    pub fn kind_of(&self, name: &str) -> Option<ActionKind> {
        self.entries.get(name).map(|e| e.kind)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes the handler registered under `action` and returns its output
    /// verbatim.
    ///
    /// No retries: handlers may call non-idempotent services.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownAction` for unregistered names and
    /// `DispatchError::HandlerFailure` if the handler fails.
    #[tracing::instrument(skip(self, input), fields(kind = tracing::field::Empty))]
    pub async fn dispatch(&self, action: &str, input: Value) -> Result<ActionOutput, DispatchError> {
        self.metrics.record_attempt();

        let Some(entry) = self.entries.get(action) else {
            self.metrics.record_unknown();
            debug!("rejecting unknown action");
            return Err(DispatchError::UnknownAction {
                name: action.to_string(),
            });
        };
        tracing::Span::current().record("kind", tracing::field::display(entry.kind));

        match entry.handler.handle(input).await {
            Ok(output) => {
                self.metrics.record_success();
                debug!("action complete");
                Ok(output)
            }
            Err(source) => {
                self.metrics.record_failure();
                warn!(error = %source, "action failed");
                Err(DispatchError::HandlerFailure {
                    action: action.to_string(),
                    source,
                })
            }
        }
    }

    /// [`dispatch`](Self::dispatch) followed by the boundary normalization
    /// that wraps bare strings as `{"response": ...}`.
    ///
    /// Every caller that hands results to clients goes through here, so all
    /// of them observe the same shape.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub async fn invoke(&self, action: &str, input: Value) -> Result<Value, DispatchError> {
        self.dispatch(action, input)
            .await
            .map(ActionOutput::into_result)
    }

    /// Returns a shared handle to the dispatch counters.
    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        self.metrics.clone()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.list_actions())
            .finish()
    }
}

/// Collects registrations and validates them in [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    pending: Vec<(String, Entry)>,
}

impl RegistryBuilder {
    /// Registers a typed action under its declared name and kind.
    pub fn register<A: Action>(self, action: A) -> Self {
        self.add(A::NAME, A::KIND, Typed::new(action))
    }

    /// Registers an untyped handler as a flow.
    pub fn flow(self, name: impl Into<String>, handler: impl ActionHandler + 'static) -> Self {
        self.add(name, ActionKind::Flow, handler)
    }

    /// Registers an untyped handler as a tool.
    pub fn tool(self, name: impl Into<String>, handler: impl ActionHandler + 'static) -> Self {
        self.add(name, ActionKind::Tool, handler)
    }

    fn add(
        mut self,
        name: impl Into<String>,
        kind: ActionKind,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        self.pending.push((
            name.into(),
            Entry {
                kind,
                handler: Arc::new(handler),
            },
        ));
        self
    }

    /// Validates every name and freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidName` for malformed names and
    /// `RegistryError::Duplicate` if a name was registered twice.
    pub fn build(self) -> Result<ActionRegistry, RegistryError> {
        let mut entries = BTreeMap::new();
        for (name, entry) in self.pending {
            ActionName::new(name.as_str()).map_err(|e| RegistryError::InvalidName {
                name: name.clone(),
                reason: e.message,
            })?;
            if entries.contains_key(&name) {
                return Err(RegistryError::Duplicate { name });
            }
            entries.insert(name, entry);
        }

        let registry = ActionRegistry {
            entries,
            metrics: DispatchMetrics::new_shared(),
        };
        let list = registry.list_actions();
        info!(
            flows = list.flows.len(),
            tools = list.tools.len(),
            "action registry ready"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::handler::handler_fn;
    use serde_json::json;

    fn echo() -> impl ActionHandler {
        handler_fn(|input: Value| async move { Ok::<_, HandlerError>(ActionOutput::Json(input)) })
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = ActionRegistry::builder()
            .flow("askAnything", echo())
            .tool("askAnything", echo())
            .build();
        assert!(matches!(result, Err(RegistryError::Duplicate { name }) if name == "askAnything"));
    }

    #[test]
    fn invalid_names_rejected() {
        let result = ActionRegistry::builder().flow("tools/call", echo()).build();
        assert!(matches!(result, Err(RegistryError::InvalidName { .. })));
    }

    #[test]
    fn list_splits_and_sorts_by_kind() {
        let registry = ActionRegistry::builder()
            .flow("weatherTips", echo())
            .tool("supportedLanguages", echo())
            .flow("askAnything", echo())
            .build()
            .expect("build");
        let list = registry.list_actions();
        assert_eq!(list.flows, vec!["askAnything", "weatherTips"]);
        assert_eq!(list.tools, vec!["supportedLanguages"]);
        assert_eq!(registry.kind_of("supportedLanguages"), Some(ActionKind::Tool));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn server_info_uses_fixed_name() {
        let registry = ActionRegistry::builder().build().expect("build");
        let info = registry.server_info();
        assert_eq!(info.name, "krushimitra-mcp");
        assert!(info.flows.is_empty() && info.tools.is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn dispatch_returns_output_verbatim() {
        let registry = ActionRegistry::builder()
            .flow("echo", echo())
            .build()
            .expect("build");
        let out = registry.dispatch("echo", json!({"x": 1})).await.expect("dispatch");
        assert_eq!(out, ActionOutput::Json(json!({"x": 1})));
    }
}
