//! `marketAnalysis`: mandi prices and selling advice for a crop.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use krushi_completion::{generate_structured, CompletionService};
use krushi_mcp::{Action, HandlerError};
use krushi_types::ActionKind;

use crate::prompt;

/// Input for `marketAnalysis`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketInput {
    pub crop: String,
    /// Village, district, or state used to pick nearby markets.
    pub location: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Headline price for the nearest relevant market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub crop: String,
    pub market: String,
    /// Modal price in rupees per `unit`.
    pub current_price: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "INR/quintal".to_string()
}

/// Price at one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketPrice {
    pub market: String,
    pub price: f64,
}

/// Structured market analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub market_data: MarketData,
    /// Prices at comparable nearby markets.
    #[serde(default)]
    pub prices: Vec<MarketPrice>,
    /// Short description of the recent price trend.
    #[serde(default)]
    pub trends: String,
    /// Whether to sell now or hold, and why.
    #[serde(default)]
    pub recommendation: String,
}

pub struct MarketAnalysis {
    completion: Arc<dyn CompletionService>,
}

impl MarketAnalysis {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Action for MarketAnalysis {
    const NAME: &'static str = "marketAnalysis";
    const KIND: ActionKind = ActionKind::Flow;
    type Input = MarketInput;
    type Output = MarketReport;

    async fn run(&self, input: MarketInput) -> Result<MarketReport, HandlerError> {
        prompt::require("crop", &input.crop)?;
        prompt::require("location", &input.location)?;

        let text = format!(
            "Analyse the agricultural market for {crop} near {location}. Give the current \
             modal price at the most relevant mandi, prices at two to four nearby mandis, \
             the recent price trend, and a clear sell-or-hold recommendation. Prices are \
             in Indian rupees.",
            crop = input.crop.trim(),
            location = input.location.trim(),
        );
        generate_structured(
            self.completion.as_ref(),
            prompt::request(text, input.language.as_deref()),
        )
        .await
        .map_err(prompt::upstream)
    }
}
