//! `supportedLanguages`: static list of answer languages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::language::{Language, SUPPORTED};

/// Accepts any object; the tool takes no parameters.
#[derive(Debug, Default, Deserialize)]
pub struct NoInput {}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageList {
    pub languages: Vec<Language>,
}

pub struct SupportedLanguages;

#[async_trait]
impl Action for SupportedLanguages {
    const NAME: &'static str = "supportedLanguages";
    const KIND: ActionKind = ActionKind::Tool;
    type Input = NoInput;
    type Output = LanguageList;

    async fn run(&self, _input: NoInput) -> Result<LanguageList, HandlerError> {
        Ok(LanguageList {
            languages: SUPPORTED.to_vec(),
        })
    }
}
