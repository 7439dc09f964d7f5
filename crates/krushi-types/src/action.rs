//! Action identity: names and the flow/tool classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KrushiError;

/// Whether a registered action is a flow or a tool.
///
/// The distinction only affects how actions are listed; dispatch treats
/// both identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Multi-step, completion-backed operation.
    Flow,
    /// Direct data lookup.
    Tool,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flow => f.write_str("flow"),
            Self::Tool => f.write_str("tool"),
        }
    }
}

/// Validated action identifier, e.g. `smartDiagnose`.
///
/// Must start with an ASCII letter and contain only ASCII alphanumerics,
/// `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionName(String);

impl ActionName {
    /// Creates a new `ActionName`, validating the format.
    pub fn new(name: impl Into<String>) -> Result<Self, KrushiError> {
        let name = name.into();
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(KrushiError::invalid_input("action name cannot be empty")),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(KrushiError::invalid_input(format!(
                    "action name must start with a letter: {name}"
                )))
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
            return Err(KrushiError::invalid_input(format!(
                "invalid character '{bad}' in action name: {name}"
            )));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActionName {
    type Err = KrushiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ActionName {
    type Error = KrushiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionName> for String {
    fn from(name: ActionName) -> Self {
        name.0
    }
}

impl AsRef<str> for ActionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
