use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use autoweb_cli::{AutoWeb, Config};
use cdp_adapter::CdpSession;
use tracing::warn;

use super::commands::PageArgs;

pub struct CliContext {
    config: Config,
    config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Starts a browser session and optionally loads `page.url`.
    pub async fn open(&self, page: &PageArgs) -> Result<OpenPage> {
        let session = Arc::new(
            CdpSession::start(self.config.cdp.clone())
                .await
                .context("Failed to start browser session")?,
        );
        let autoweb = AutoWeb::new(session.clone(), &self.config)?;
        if let Some(url) = &page.url {
            autoweb
                .load_url(url)
                .await
                .with_context(|| format!("Failed to load {url}"))?;
        }
        Ok(OpenPage { session, autoweb })
    }
}

pub struct OpenPage {
    session: Arc<CdpSession>,
    pub autoweb: AutoWeb,
}

impl OpenPage {
    pub async fn close(self) {
        if let Err(err) = self.session.close().await {
            warn!(error = %err, "browser did not close cleanly");
        }
    }
}
