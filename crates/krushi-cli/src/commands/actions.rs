//! `krushi actions` command.

use clap::Args;

use krushi_config::KrushiConfig;

use crate::{output, shared};

/// List the flows and tools this build registers.
#[derive(Debug, Args)]
pub struct ActionsArgs {
    /// Print the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the actions command.
pub fn execute(args: &ActionsArgs, config: &KrushiConfig) -> anyhow::Result<()> {
    let registry = shared::build_registry(config)?;
    let info = registry.server_info();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        output::print_server_info(&info);
    }
    Ok(())
}
