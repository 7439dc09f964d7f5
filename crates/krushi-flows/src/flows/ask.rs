//! `askAnything`: free-form farming question.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use krushi_completion::CompletionService;
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `askAnything`.
#[derive(Debug, Clone, Deserialize)]
pub struct AskInput {
    /// The farmer's question.
    pub text: String,
    /// Answer language (code or name).
    #[serde(default)]
    pub language: Option<String>,
}

/// Output for `askAnything`.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutput {
    pub response: String,
}

pub struct AskAnything {
    completion: Arc<dyn CompletionService>,
}

impl AskAnything {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for AskAnything {
    const NAME: &'static str = "askAnything";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = AskInput;
    type Output = AskOutput;

    async fn run(&self, input: AskInput) -> Result<AskOutput, HandlerError> {
        prompt::require("text", &input.text)?;
        let request = prompt::request(
            format!(
                "A farmer asks the following question. Answer it clearly in a few short \
                 paragraphs or bullet points.\n\nQuestion: {}",
                input.text.trim()
            ),
            input.language.as_deref(),
        );
        let response = self
            .completion
            .complete(request)
            .await
            .map_err(prompt::upstream)?;
        Ok(AskOutput {
            response: response.trim().to_string(),
        })
    }
}
