//! Configuration loader (file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use krushi_protocol::check_endpoint_path;
use krushi_types::{DiagnosticError, ErrorKind, KrushiError};

use crate::schema::KrushiConfig;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "KRUSHI_";

/// Well-known variables consulted for the completion API key, in order.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

const SECTIONS: &[&str] = &["server", "completion", "weather", "logging"];

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
    /// The merged configuration has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for KrushiError {
    fn from(e: ConfigError) -> Self {
        KrushiError::new(ErrorKind::InvalidInput, e.to_string())
    }
}

impl DiagnosticError for ConfigError {
    fn hint(&self) -> Option<String> {
        Some(format!(
            "configuration comes from defaults, the --config TOML file, and {ENV_PREFIX}* variables"
        ))
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Load(_) => Some("check the TOML syntax and section names".into()),
            Self::Invalid(_) => None,
        }
    }
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`KRUSHI_` prefix, `__` between section and key)
/// 4. `GEMINI_API_KEY` / `GOOGLE_API_KEY` when no API key is set above
///
/// # Errors
///
/// Returns `ConfigError::Load` if a layer cannot be read or has unknown
/// keys, and `ConfigError::Invalid` if the result fails validation.
pub fn load_config(config_path: Option<&Path>) -> Result<KrushiConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(KrushiConfig::default()));

    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::Load(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .filter(|key| {
                let key = key.as_str().to_ascii_lowercase();
                SECTIONS
                    .iter()
                    .any(|s| key.strip_prefix(s).is_some_and(|rest| rest.starts_with("__")))
            })
            .split("__"),
    );

    let mut config: KrushiConfig = figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    if config.completion.api_key.is_none() {
        config.completion.api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &KrushiConfig) -> Result<(), ConfigError> {
    check_endpoint_path(&config.server.path)
        .map_err(|msg| ConfigError::Invalid(format!("server.path: {msg}")))?;
    if config.completion.timeout_secs == 0 || config.weather.timeout_secs == 0 {
        return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
    }
    if !(0.0..=2.0).contains(&config.completion.temperature) {
        return Err(ConfigError::Invalid(format!(
            "completion.temperature must be within 0..=2, got {}",
            config.completion.temperature
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&KrushiConfig::default()).is_ok());
    }

    #[test]
    fn relative_path_rejected() {
        let mut config = KrushiConfig::default();
        config.server.path = "api/mcp".into();
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn health_routes_rejected_as_endpoint_path() {
        for path in ["/health", "/health/ready"] {
            let mut config = KrushiConfig::default();
            config.server.path = path.into();
            let err = validate(&config).unwrap_err();
            assert!(err.to_string().contains("reserved"), "{path}: {err}");
        }
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = KrushiConfig::default();
        config.weather.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut config = KrushiConfig::default();
        config.completion.temperature = 3.5;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = load_config(Some(Path::new("/nonexistent/krushi.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().contains("not found"));
    }
}
