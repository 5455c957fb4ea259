use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autoweb_cli::config::resolve_config_path;
use autoweb_cli::Config;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

/// `--config FILE`, then `./config/autoweb.yaml`, then the per-user config,
/// else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        warn!("Config file not found, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            path: None,
        });
    };

    let config = Config::from_file(&path)
        .with_context(|| format!("Failed to load config file {}", path.display()))?;
    info!("Loaded configuration from: {}", path.display());
    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}
