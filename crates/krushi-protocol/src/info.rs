//! Server info returned by `GET <mcp-endpoint>`.

use serde::{Deserialize, Serialize};

/// Registered action names split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionList {
    /// Flow names, sorted.
    pub flows: Vec<String>,
    /// Tool names, sorted.
    pub tools: Vec<String>,
}

impl ActionList {
    /// Iterates over every registered name, flows first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flows.iter().chain(self.tools.iter()).map(String::as_str)
    }

    /// Returns `true` if `name` appears in either list.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Total number of registered actions.
    pub fn len(&self) -> usize {
        self.flows.len() + self.tools.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Snapshot of the server identity and its registered actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Registered flow names.
    pub flows: Vec<String>,
    /// Registered tool names.
    pub tools: Vec<String>,
}

impl ServerInfo {
    /// Builds a snapshot from a name, version, and action list.
    pub fn new(name: impl Into<String>, version: impl Into<String>, actions: ActionList) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            flows: actions.flows,
            tools: actions.tools,
        }
    }

    /// Returns the action names as an `ActionList`.
    pub fn actions(&self) -> ActionList {
        ActionList {
            flows: self.flows.clone(),
            tools: self.tools.clone(),
        }
    }
}
