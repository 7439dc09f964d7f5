//! `governmentSchemes`: schemes, subsidies, and assistance a farmer may claim.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use krushi_completion::{generate_structured, CompletionService};
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `governmentSchemes`. All fields narrow the search; none is
/// required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemesInput {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    /// e.g. "small", "marginal", "tenant", "women".
    #[serde(default)]
    pub farmer_category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One government scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub how_to_apply: String,
}

/// Structured scheme report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SchemeReport {
    #[serde(default)]
    pub schemes: Vec<Scheme>,
    #[serde(default)]
    pub subsidies: Vec<String>,
    #[serde(default)]
    pub assistance: Vec<String>,
}

pub struct GovernmentSchemes {
    completion: Arc<dyn CompletionService>,
}

impl GovernmentSchemes {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for GovernmentSchemes {
    const NAME: &'static str = "governmentSchemes";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = SchemesInput;
    type Output = SchemeReport;

    async fn run(&self, input: SchemesInput) -> Result<SchemeReport, HandlerError> {
        let mut text = String::from(
            "List the central and state government schemes this farmer can apply for. For \
             each scheme give its eligibility, benefits, and how to apply. Also list \
             relevant input subsidies and other assistance (credit, insurance, helplines).",
        );
        prompt::push_line(&mut text, "State", input.state.as_deref());
        prompt::push_line(&mut text, "Crop", input.crop.as_deref());
        prompt::push_line(&mut text, "Farmer category", input.farmer_category.as_deref());

        generate_structured(
            self.completion.as_ref(),
            prompt::request(text, input.language.as_deref()),
        )
        .await
        .map_err(prompt::upstream)
    }
}
