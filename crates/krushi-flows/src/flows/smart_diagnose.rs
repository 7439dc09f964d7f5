//! `smartDiagnose`: quick diagnosis from a description and/or photo.
//!
//! Returns a bare string; the dispatch boundary wraps it as
//! `{"response": ...}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use krushi_completion::CompletionService;
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `smartDiagnose`. At least one of `text` or `photoDataUri`
/// must be supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartDiagnoseInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub photo_data_uri: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

pub struct SmartDiagnose {
    completion: Arc<dyn CompletionService>,
}

impl SmartDiagnose {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for SmartDiagnose {
    const NAME: &'static str = "smartDiagnose";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = SmartDiagnoseInput;
    type Output = String;

    async fn run(&self, input: SmartDiagnoseInput) -> Result<String, HandlerError> {
        let has_photo = input
            .photo_data_uri
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        if input.text.trim().is_empty() && !has_photo {
            return Err(HandlerError::invalid_input(
                "provide a `text` description or a `photoDataUri`",
            ));
        }

        let mut text = String::from(
            "Diagnose the most likely problem with this crop and suggest what the farmer \
             should do next. Keep it short: the likely cause, then two or three actions.",
        );
        prompt::push_line(&mut text, "Farmer's description", Some(&input.text));
        if has_photo {
            text.push_str("\nA photo of the affected plant is attached.");
        }

        let request = prompt::with_photo(
            prompt::request(text, input.language.as_deref()),
            input.photo_data_uri.as_deref(),
        )?;
        let answer = self
            .completion
            .complete(request)
            .await
            .map_err(prompt::upstream)?;
        Ok(answer.trim().to_string())
    }
}
