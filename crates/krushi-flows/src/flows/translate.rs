//! `translateText`: translate UI or advice text between languages.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use krushi_completion::{CompletionRequest, CompletionService};
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::{language, prompt};

/// Input for `translateText`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    pub text: String,
    /// Target language (code or name).
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

/// Output for `translateText`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOutput {
    pub text: String,
    pub target_language: String,
}

pub struct TranslateText {
    completion: Arc<dyn CompletionService>,
}

impl TranslateText {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for TranslateText {
    const NAME: &'static str = "translateText";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = TranslateInput;
    type Output = TranslateOutput;

    async fn run(&self, input: TranslateInput) -> Result<TranslateOutput, HandlerError> {
        prompt::require("text", &input.text)?;
        prompt::require("targetLanguage", &input.target_language)?;

        let target = language::resolve(Some(&input.target_language));
        let source = input
            .source_language
            .as_deref()
            .map(|s| language::resolve(Some(s)));
        if source.as_deref() == Some(target.as_str()) {
            return Ok(TranslateOutput {
                text: input.text,
                target_language: target,
            });
        }

        let from = source.map_or_else(String::new, |s| format!(" from {s}"));
        let request = CompletionRequest::new(format!(
            "Translate the following text{from} into {target}. Keep numbers, units, and \
             product names unchanged. Reply with the translation only.\n\n{}",
            input.text
        ))
        .with_temperature(0.0);

        let translated = self
            .completion
            .complete(request)
            .await
            .map_err(prompt::upstream)?;
        Ok(TranslateOutput {
            text: translated.trim().to_string(),
            target_language: target,
        })
    }
}
