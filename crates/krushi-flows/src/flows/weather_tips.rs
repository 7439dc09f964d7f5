//! `weatherTips`: forecast summary with irrigation advice.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use krushi_completion::{generate_structured, CompletionService};
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `weatherTips`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherTipsInput {
    pub location: String,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Structured weather advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherTipsReport {
    /// Plain-language outlook for the next few days.
    pub weather_forecast: String,
    #[serde(default)]
    pub irrigation_tips: Vec<String>,
    /// Heat, frost, heavy-rain, or pest-risk warnings.
    #[serde(default)]
    pub alerts: Vec<String>,
}

pub struct WeatherTips {
    completion: Arc<dyn CompletionService>,
}

impl WeatherTips {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for WeatherTips {
    const NAME: &'static str = "weatherTips";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = WeatherTipsInput;
    type Output = WeatherTipsReport;

    async fn run(&self, input: WeatherTipsInput) -> Result<WeatherTipsReport, HandlerError> {
        prompt::require("location", &input.location)?;

        let mut text = format!(
            "Summarise the typical weather outlook for the coming days at {} for this \
             season, then give irrigation tips and any weather alerts a farmer should act on.",
            input.location.trim()
        );
        prompt::push_line(&mut text, "Crop", input.crop.as_deref());

        generate_structured(
            self.completion.as_ref(),
            prompt::request(text, input.language.as_deref()),
        )
        .await
        .map_err(prompt::upstream)
    }
}
