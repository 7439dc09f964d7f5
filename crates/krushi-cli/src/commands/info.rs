//! `krushi info` command.

use clap::Args;

use krushi_config::KrushiConfig;

use crate::{output, shared};

/// Show a running server's name, version, and actions.
#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub remote: shared::RemoteArgs,
    /// Print the server info as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the info command.
pub async fn execute(args: &InfoArgs, config: &KrushiConfig) -> anyhow::Result<()> {
    let client = args.remote.client(config)?;
    let info = client.get_server_info().await.map_err(shared::fail)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        output::print_server_info(&info);
    }
    Ok(())
}
