//! Shared helpers used across CLI commands.
//!
//! Centralises building the action registry from configuration and
//! creating the HTTP client, so every command uses the same defaults.
//! Command failures travel as [`KrushiError`] so `main` can map their
//! kind to an exit status.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;

use krushi_client::McpClient;
use krushi_completion::{GeminiClient, GeminiConfig};
use krushi_config::KrushiConfig;
use krushi_flows::{default_registry, OpenMeteoClient};
use krushi_mcp::ActionRegistry;
use krushi_types::{DiagnosticError, ErrorKind, KrushiError};

/// Where to reach a running server.
#[derive(Debug, Default, Args)]
pub struct RemoteArgs {
    /// MCP endpoint URL. Defaults to the configured server address.
    #[arg(long, env = "KRUSHI_ENDPOINT")]
    pub endpoint: Option<String>,
    /// Bearer token for the endpoint. Defaults to `server.token`.
    #[arg(long, env = "KRUSHI_TOKEN")]
    pub token: Option<String>,
}

impl RemoteArgs {
    /// Builds a client for the selected endpoint.
    ///
    /// # Errors
    ///
    /// Returns a classified [`KrushiError`] if the HTTP client cannot be
    /// created.
    pub fn client(&self, config: &KrushiConfig) -> anyhow::Result<McpClient> {
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| config.server.endpoint_url());
        let token = self.token.clone().or_else(|| config.server.token.clone());
        Ok(McpClient::new(endpoint).map_err(fail)?.with_token(token))
    }
}

/// Builds the registry with the Gemini completion client and the
/// Open-Meteo weather provider.
///
/// # Errors
///
/// Returns an error if a backend client cannot be created or the
/// registry has conflicting names.
pub fn build_registry(config: &KrushiConfig) -> anyhow::Result<Arc<ActionRegistry>> {
    let completion = &config.completion;
    let gemini = GeminiClient::new(GeminiConfig {
        base_url: completion.base_url.clone(),
        model: completion.model.clone(),
        api_key: completion.api_key.clone(),
        timeout: completion.timeout(),
        temperature: completion.temperature,
    })
    .map_err(|e| fail(e).with_context("completion client"))?;
    let weather = OpenMeteoClient::new(config.weather.base_url.clone(), config.weather.timeout())
        .map_err(|e| fail(e).with_context("weather client"))?;

    let registry = default_registry(Arc::new(gemini), Arc::new(weather)).map_err(fail)?;
    Ok(Arc::new(registry))
}

/// Reports `e` to stderr and classifies it.
pub fn fail<E>(e: E) -> KrushiError
where
    E: DiagnosticError + Into<KrushiError>,
{
    report(&e);
    e.into()
}

/// Exit status for a failed command.
///
/// `2` when the caller can fix the request or configuration, `3` when a
/// downstream service failed or timed out, `1` otherwise.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    let kind = err.downcast_ref::<KrushiError>().map(|e| e.kind);
    match kind {
        Some(kind) if kind.is_client_error() => ExitCode::from(2),
        Some(ErrorKind::Upstream | ErrorKind::Timeout) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}

/// Prints the cause and fix of an operator-facing error to stderr.
pub fn report(e: &dyn DiagnosticError) {
    if let Some(hint) = e.hint() {
        eprintln!("\n  Cause: {hint}");
    }
    if let Some(fix) = e.fix() {
        eprintln!("  Fix:   {fix}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_full_registry() {
        let registry = build_registry(&KrushiConfig::default()).expect("registry");
        let list = registry.list_actions();
        assert_eq!(list.flows.len(), 7);
        assert_eq!(list.tools.len(), 2);
        assert!(registry.contains("askAnything"));
        assert!(registry.contains("getCurrentWeather"));
    }

    #[test]
    fn remote_defaults_to_configured_server() {
        let mut config = KrushiConfig::default();
        config.server.port = 9100;
        config.server.token = Some("kisan".into());
        let client = RemoteArgs::default().client(&config).expect("client");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9100/api/mcp");
    }

    #[test]
    fn exit_code_follows_error_kind() {
        let code = |kind| exit_code(&anyhow::Error::new(KrushiError::new(kind, "x")));
        assert_eq!(code(ErrorKind::NotFound), ExitCode::from(2));
        assert_eq!(code(ErrorKind::InvalidInput), ExitCode::from(2));
        assert_eq!(code(ErrorKind::Upstream), ExitCode::from(3));
        assert_eq!(code(ErrorKind::Timeout), ExitCode::from(3));
        assert_eq!(code(ErrorKind::Internal), ExitCode::FAILURE);
        assert_eq!(exit_code(&anyhow::anyhow!("plain")), ExitCode::FAILURE);
    }

    #[test]
    fn fail_classifies_unknown_action() {
        let err = fail(krushi_mcp::DispatchError::UnknownAction {
            name: "doesNotExist".into(),
        });
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("doesNotExist"));
    }

    #[test]
    fn explicit_endpoint_wins() {
        let args = RemoteArgs {
            endpoint: Some("http://farm.local:8080/api/mcp".into()),
            token: None,
        };
        let client = args.client(&KrushiConfig::default()).expect("client");
        assert_eq!(client.endpoint(), "http://farm.local:8080/api/mcp");
    }
}
