//! `krushi serve` command.
//!
//! Builds the action registry and serves it over HTTP until Ctrl-C.

use std::future::Future;

use clap::Args;

use krushi_config::KrushiConfig;
use krushi_transport_http::HttpServer;

use crate::shared;

/// Start the HTTP MCP endpoint.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
    /// Endpoint path (overrides `server.path`).
    #[arg(long)]
    pub path: Option<String>,
    /// Bearer token required from callers (overrides `server.token`).
    #[arg(long)]
    pub token: Option<String>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &KrushiConfig) -> anyhow::Result<()> {
    let registry = shared::build_registry(config)?;
    if config.completion.api_key.is_none() {
        tracing::warn!("no completion API key configured; flows will fail until one is set");
    }

    let server = &config.server;
    let http = HttpServer::new(
        registry,
        args.host.clone().unwrap_or_else(|| server.host.clone()),
        args.port.unwrap_or(server.port),
    )
    .with_path(args.path.clone().unwrap_or_else(|| server.path.clone()))
    .with_token(args.token.clone().or_else(|| server.token.clone()));

    http.run_until(shutdown_signal()).await.map_err(shared::fail)?;
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the server keeps
/// running and must be stopped another way.
async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await;
}

async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
