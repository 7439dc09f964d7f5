//! # krushi-client
//!
//! Call-site wrapper around the MCP endpoint for UI and CLI code, and
//! [`parse_response`], which turns any result payload into display text.

pub mod client;
pub mod error;
pub mod format;

pub use client::McpClient;
pub use error::ClientError;
pub use format::{classify, parse_response, Shape};
