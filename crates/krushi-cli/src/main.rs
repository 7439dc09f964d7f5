//! KrushiMitra CLI: serve the MCP endpoint or call it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use krushi_config::{load_config, LogFormat};

mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// KrushiMitra - farmer assistant flows over a small MCP endpoint.
#[derive(Debug, Parser)]
#[command(name = "krushi", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain or json. Defaults to `logging.format`.
    #[arg(long, global = true, value_parser = ["plain", "json"])]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP MCP endpoint.
    Serve(commands::serve::ServeArgs),
    /// List the flows and tools this build registers.
    Actions(commands::actions::ActionsArgs),
    /// Show a running server's name, version, and actions.
    Info(commands::info::InfoArgs),
    /// Run a flow or tool, remotely or in-process.
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            shared::exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).map_err(shared::fail)?;

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let json = match cli.log_format.as_deref() {
        Some(format) => format == "json",
        None => config.logging.format == LogFormat::Json,
    };
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(config = ?cli.config, "krushi starting");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Actions(args) => commands::actions::execute(args, &config),
        Commands::Info(args) => commands::info::execute(args, &config).await,
        Commands::Call(args) => commands::call::execute(args, &config).await,
    }
}
