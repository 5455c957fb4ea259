use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

use super::click::{cmd_click, cmd_click_url};
use super::commands::Commands;
use super::context::CliContext;
use super::env::CliArgs;
use super::probe::cmd_probe;
use super::runtime::{init_logging, load_config, LoadedConfig};
use super::scan::{cmd_scan_elements, cmd_scan_urls};

pub async fn run() -> Result<ExitCode> {
    let cli = CliArgs::parse();

    init_logging(&cli.log_level, cli.debug)?;
    info!("Starting AutoWeb v{}", env!("CARGO_PKG_VERSION"));

    let LoadedConfig { config, path } = load_config(cli.config.as_deref())?;
    let ctx = CliContext::new(config, path);
    if let Some(path) = ctx.config_path() {
        debug!(path = %path.display(), "config in effect");
    }

    let format = cli.output;
    let outcome = match cli.command {
        Commands::ScanElements(args) => cmd_scan_elements(args, &ctx, format).await.map(|_| true),
        Commands::ScanUrls(args) => cmd_scan_urls(args, &ctx, format).await.map(|_| true),
        Commands::Click(args) => cmd_click(args, &ctx, format).await,
        Commands::ClickUrl(args) => cmd_click_url(args, &ctx, format).await,
        Commands::Probe(args) => cmd_probe(args, &ctx, format).await.map(|_| true),
    };

    match outcome {
        Ok(true) => {
            info!("Command completed successfully");
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
