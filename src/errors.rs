//! Error handling module

use std::path::PathBuf;

use action_locator::LocatorError;
use action_primitives::ActionError;
use autoweb_core_types::ErrorKind;
use page_inventory::InventoryError;
use thiserror::Error;
use tool_click::ClickError;
use tool_scroll::RevealError;

/// Failures surfaced by [`crate::AutoWeb`].
#[derive(Debug, Error)]
pub enum AutoWebError {
    #[error(transparent)]
    Page(#[from] ActionError),
    #[error(transparent)]
    Locate(#[from] LocatorError),
    #[error(transparent)]
    Reveal(#[from] RevealError),
    #[error(transparent)]
    Click(#[from] ClickError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl AutoWebError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AutoWebError::Page(err) => err.kind(),
            AutoWebError::Locate(err) => err.kind(),
            AutoWebError::Reveal(err) => err.kind(),
            AutoWebError::Click(err) => err.kind(),
            AutoWebError::Inventory(err) => err.kind(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
