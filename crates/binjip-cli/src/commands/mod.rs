//! Command implementations

mod config;
mod districts;
mod inspect;
mod render;

use std::path::Path;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use binjip_core::config::{CliConfigOverrides, LayeredConfig};

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => render::execute(args, config_path, &output).await,
        Commands::Inspect(args) => inspect::execute(args, &output),
        Commands::Districts => districts::execute(&output),
        Commands::Config => config::execute(config_path, &output),
    }
}

/// Defaults, then the optional config file, then the environment, then command-line flags
fn load_config(config_path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = config_path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(overrides)?;
    Ok(config)
}
