//! # krushi-flows
//!
//! The concrete actions behind the MCP endpoint.
//!
//! Flows compose a prompt from their typed input and call the completion
//! service; tools are direct lookups. [`default_registry`] wires all of
//! them into an `ActionRegistry`.

pub mod flows;
pub mod language;
mod prompt;
pub mod tools;

use std::sync::Arc;

use krushi_completion::CompletionService;
use krushi_mcp::{ActionRegistry, RegistryError};

pub use flows::{
    AskAnything, DiagnoseCropDisease, GovernmentSchemes, MarketAnalysis, SmartDiagnose,
    TranslateText, WeatherTips,
};
pub use tools::{
    CurrentWeather, GetCurrentWeather, OpenMeteoClient, SupportedLanguages, WeatherError,
    WeatherProvider,
};

/// Builds the registry with every flow and tool.
///
/// # Errors
///
/// Returns `RegistryError` if two actions share a name.
pub fn default_registry(
    completion: Arc<dyn CompletionService>,
    weather: Arc<dyn WeatherProvider>,
) -> Result<ActionRegistry, RegistryError> {
    ActionRegistry::builder()
        .register(AskAnything::new(completion.clone()))
        .register(SmartDiagnose::new(completion.clone()))
        .register(DiagnoseCropDisease::new(completion.clone()))
        .register(MarketAnalysis::new(completion.clone()))
        .register(GovernmentSchemes::new(completion.clone()))
        .register(WeatherTips::new(completion.clone()))
        .register(TranslateText::new(completion))
        .register(GetCurrentWeather::new(weather))
        .register(SupportedLanguages)
        .build()
}
