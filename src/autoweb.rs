//! Entry points exposed to shells and the CLI.

use std::sync::Arc;

use action_locator::{DefaultElementLocator, ElementLocator, LocateDiagnostics};
use action_primitives::{
    DefaultSettleStrategy, GestureActuator, PageNavigator, PageQueryChannel, SurfaceMetrics,
};
use autoweb_core_types::{ActionId, ElementDescriptor, ElementSnapshot};
use page_inventory::{DefaultPageInventory, PageInventory};
use tool_click::{ClickError, ClickOrchestrator, ClickOrchestratorBuilder, ClickParams, ClickReport, ExecCtx};
use tool_scroll::{RevealReport, RevealTarget, ViewportReconciler, ViewportReconcilerBuilder};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::errors::AutoWebError;

/// Element targeting, scrolling and clicking on one page.
pub struct AutoWeb {
    locator: Arc<dyn ElementLocator>,
    reconciler: Arc<dyn ViewportReconciler>,
    clicker: Arc<dyn ClickOrchestrator>,
    inventory: Arc<dyn PageInventory>,
    navigator: Arc<dyn PageNavigator>,
}

impl AutoWeb {
    /// Builds every component on top of `page`, which must implement all
    /// page ports.
    pub fn new<P>(page: Arc<P>, config: &Config) -> Result<Self, AutoWebError>
    where
        P: PageQueryChannel + GestureActuator + SurfaceMetrics + PageNavigator + 'static,
    {
        let locator: Arc<dyn ElementLocator> = Arc::new(DefaultElementLocator::new(page.clone()));
        let reconciler = ViewportReconcilerBuilder::new(config.scroll.clone())
            .with_locator(locator.clone())
            .with_channel(page.clone())
            .with_actuator(page.clone())
            .with_surface(page.clone())
            .with_settle(Arc::new(DefaultSettleStrategy::new(config.lazy_load.clone())))
            .build()?;
        let clicker = ClickOrchestratorBuilder::new(config.click.clone())
            .with_locator(locator.clone())
            .with_reconciler(reconciler.clone())
            .with_actuator(page.clone())
            .build()?;
        Ok(Self {
            locator,
            reconciler,
            clicker,
            inventory: Arc::new(DefaultPageInventory::new(page.clone())),
            navigator: page,
        })
    }

    pub async fn scan_elements(&self) -> Result<Vec<ElementSnapshot>, AutoWebError> {
        Ok(self.inventory.list_elements().await?)
    }

    pub async fn scan_urls(&self) -> Result<Vec<String>, AutoWebError> {
        Ok(self.inventory.list_urls().await?)
    }

    pub async fn locate(&self, descriptor: &ElementDescriptor) -> Result<ElementSnapshot, AutoWebError> {
        Ok(self.locator.locate(descriptor).await?)
    }

    /// Per-strategy breakdown of how `identifier` resolves.
    pub async fn probe(&self, identifier: &str) -> Result<LocateDiagnostics, AutoWebError> {
        Ok(self.locator.diagnose(identifier).await?)
    }

    pub async fn reveal(&self, target: RevealTarget) -> Result<RevealReport, AutoWebError> {
        Ok(self.reconciler.ensure_visible(target).await?)
    }

    pub async fn click_element(&self, descriptor: ElementDescriptor) -> ClickReport {
        self.click(ClickParams::new(descriptor)).await
    }

    /// Clicks an element from a previous scan, skipping the initial lookup
    /// when the snapshot was visible.
    pub async fn click_snapshot(&self, snapshot: ElementSnapshot) -> ClickReport {
        self.click(ClickParams::from_snapshot(snapshot)).await
    }

    /// Clicks the first anchor pointing at `url`, fragments ignored.
    #[instrument(skip(self))]
    pub async fn click_url(&self, url: &str) -> ClickReport {
        match self.inventory.find_link(url).await {
            Ok(descriptor) => {
                info!(%descriptor, "link resolved");
                self.click(ClickParams::new(descriptor)).await
            }
            Err(err) => {
                warn!(error = %err, "link lookup failed");
                ClickReport::new(ActionId::new()).fail(&ClickError::TargetNotFound(err.to_string()))
            }
        }
    }

    pub async fn load_url(&self, url: &str) -> Result<(), AutoWebError> {
        Ok(self.navigator.load_url(url).await?)
    }

    pub async fn reload(&self) -> Result<(), AutoWebError> {
        Ok(self.navigator.reload().await?)
    }

    async fn click(&self, params: ClickParams) -> ClickReport {
        let report = self.clicker.click(ExecCtx::new(ActionId::new()), params).await;
        info!(
            action = %report.action_id,
            ok = report.ok,
            latency_ms = report.latency_ms,
            "click finished"
        );
        report
    }
}
