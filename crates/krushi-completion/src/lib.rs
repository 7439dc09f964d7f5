//! # krushi-completion
//!
//! Contract for the external generative completion service used by the
//! farmer flows, plus a Gemini REST implementation.
//!
//! Handlers depend only on [`CompletionService`]; the dispatcher never sees
//! this crate.

pub mod error;
pub mod gemini;
pub mod media;
pub mod request;
pub mod structured;

use async_trait::async_trait;

pub use error::CompletionError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use media::{parse_data_uri, InlineMedia};
pub use request::CompletionRequest;
pub use structured::{extract_json, generate_structured, output_schema};

/// A text/JSON completion backend.
///
/// Implementations must be safe to call concurrently; each call is
/// independent.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends a prompt and returns the raw text of the model's answer.
    ///
    /// # Errors
    ///
    /// Returns a `CompletionError` on transport failure, a non-success
    /// status, rate limiting, or an empty answer.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
