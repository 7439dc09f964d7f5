//! `diagnoseCropDisease`: structured disease diagnosis.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use krushi_completion::{generate_structured, CompletionService};
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `diagnoseCropDisease`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseInput {
    /// What the farmer observes.
    pub description: String,
    #[serde(default)]
    pub photo_data_uri: Option<String>,
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Structured diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropDiagnosis {
    /// Most likely disease or disorder.
    pub disease: String,
    /// Confidence between 0 and 1.
    pub confidence: f64,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
}

impl CropDiagnosis {
    /// Brings `confidence` into `[0, 1]`; models sometimes answer in percent.
    fn normalize(mut self) -> Self {
        if self.confidence > 1.0 && self.confidence <= 100.0 {
            self.confidence /= 100.0;
        }
        self.confidence = if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

pub struct DiagnoseCropDisease {
    completion: Arc<dyn CompletionService>,
}

impl DiagnoseCropDisease {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for DiagnoseCropDisease {
    const NAME: &'static str = "diagnoseCropDisease";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = DiagnoseInput;
    type Output = CropDiagnosis;

    async fn run(&self, input: DiagnoseInput) -> Result<CropDiagnosis, HandlerError> {
        prompt::require("description", &input.description)?;

        let mut text = String::from(
            "Identify the crop disease, pest, or nutrient disorder described below. Give a \
             confidence between 0 and 1, the visible symptoms, treatment steps, and \
             prevention measures.",
        );
        prompt::push_line(&mut text, "Crop", input.crop_type.as_deref());
        prompt::push_line(&mut text, "Observations", Some(&input.description));

        let request = prompt::with_photo(
            prompt::request(text, input.language.as_deref()),
            input.photo_data_uri.as_deref(),
        )?;
        let diagnosis: CropDiagnosis = generate_structured(self.completion.as_ref(), request)
            .await
            .map_err(prompt::upstream)?;
        Ok(diagnosis.normalize())
    }
}
