//! `krushi call` command.
//!
//! Sends `{action, input}` to a running server, or with `--local` invokes
//! the in-process registry. Both paths print the same result shape.

use clap::Args;
use serde_json::Value;

use krushi_config::KrushiConfig;
use krushi_types::KrushiError;

use crate::{input, output, shared};

/// Run a flow or tool.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Action name (e.g. askAnything, getCurrentWeather).
    pub action: String,
    /// JSON input for the action.
    #[arg(short, long, default_value = "{}")]
    pub input: String,
    /// Read JSON input from a file (use "-" for stdin).
    #[arg(short = 'f', long)]
    pub input_file: Option<String>,
    /// Invoke the registry in-process instead of over HTTP.
    #[arg(long)]
    pub local: bool,
    /// Print the raw `result` JSON instead of formatted text.
    #[arg(long)]
    pub raw: bool,
    #[command(flatten)]
    pub remote: shared::RemoteArgs,
}

/// Executes the call command.
pub async fn execute(args: &CallArgs, config: &KrushiConfig) -> anyhow::Result<()> {
    let result = run(args, config).await?;
    output::print_result(&result, args.raw)?;
    Ok(())
}

/// Resolves input and performs the call, returning the `result` payload.
pub(crate) async fn run(args: &CallArgs, config: &KrushiConfig) -> anyhow::Result<Value> {
    let payload = input::resolve_input(&args.input, args.input_file.as_deref())
        .map_err(|e| KrushiError::invalid_input(format!("{e:#}")))?;
    let context = format!("action: {}", args.action);

    tracing::debug!(action = %args.action, local = args.local, "calling action");

    if args.local {
        let registry = shared::build_registry(config)?;
        let result = registry
            .invoke(&args.action, payload)
            .await
            .map_err(|e| shared::fail(e).with_context(context))?;
        return Ok(result);
    }

    let client = args.remote.client(config)?;
    let result = client
        .call(&args.action, payload)
        .await
        .map_err(|e| shared::fail(e).with_context(context))?;
    Ok(result)
}
