//! # krushi-config
//!
//! Configuration for the KrushiMitra server and CLI.
//! Supports layered config: defaults -> file -> env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, ENV_PREFIX};
pub use schema::{
    CompletionConfig, KrushiConfig, LogFormat, LoggingConfig, ServerConfig, WeatherConfig,
};
