//! Completion-backed flows.
//!
//! Each flow validates its typed input, builds a prompt, and either returns
//! the model's free text or parses it into a structured output.

mod ask;
mod diagnose;
mod market;
mod schemes;
mod smart_diagnose;
mod translate;
mod weather_tips;

pub use ask::{AskAnything, AskInput, AskOutput};
pub use diagnose::{CropDiagnosis, DiagnoseCropDisease, DiagnoseInput};
pub use market::{MarketAnalysis, MarketData, MarketInput, MarketPrice, MarketReport};
pub use schemes::{GovernmentSchemes, Scheme, SchemeReport, SchemesInput};
pub use smart_diagnose::{SmartDiagnose, SmartDiagnoseInput};
pub use translate::{TranslateInput, TranslateOutput, TranslateText};
pub use weather_tips::{WeatherTips, WeatherTipsInput, WeatherTipsReport};
