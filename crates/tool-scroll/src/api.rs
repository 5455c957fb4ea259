use std::sync::Arc;

use action_locator::ElementLocator;
use action_primitives::{
    DefaultSettleStrategy, GestureActuator, PageQueryChannel, SettleStrategy, SurfaceMetrics,
};
use async_trait::async_trait;
use autoweb_core_types::ElementDescriptor;

use crate::errors::RevealError;
use crate::model::{RevealReport, RevealTarget};
use crate::policy::ScrollPolicy;
use crate::runner::{self, RuntimeDeps};

/// Brings elements into the viewport with swipe gestures.
#[async_trait]
pub trait ViewportReconciler: Send + Sync {
    /// Scrolls until `target` is visible, choosing a precise or stepped approach
    /// from where it currently sits. Viewport size is read fresh on every call.
    async fn ensure_visible(&self, target: RevealTarget) -> Result<RevealReport, RevealError>;

    /// Stepped search for a target that is not currently located.
    async fn search(&self, descriptor: &ElementDescriptor) -> Result<RevealReport, RevealError>;
}

pub struct ViewportReconcilerBuilder {
    policy: ScrollPolicy,
    locator: Option<Arc<dyn ElementLocator>>,
    channel: Option<Arc<dyn PageQueryChannel>>,
    actuator: Option<Arc<dyn GestureActuator>>,
    surface: Option<Arc<dyn SurfaceMetrics>>,
    settle: Option<Arc<dyn SettleStrategy>>,
}

impl ViewportReconcilerBuilder {
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            locator: None,
            channel: None,
            actuator: None,
            surface: None,
            settle: None,
        }
    }

    pub fn with_locator(mut self, port: Arc<dyn ElementLocator>) -> Self {
        self.locator = Some(port);
        self
    }

    pub fn with_channel(mut self, port: Arc<dyn PageQueryChannel>) -> Self {
        self.channel = Some(port);
        self
    }

    pub fn with_actuator(mut self, port: Arc<dyn GestureActuator>) -> Self {
        self.actuator = Some(port);
        self
    }

    pub fn with_surface(mut self, port: Arc<dyn SurfaceMetrics>) -> Self {
        self.surface = Some(port);
        self
    }

    /// Defaults to [`DefaultSettleStrategy`] with its default timings.
    pub fn with_settle(mut self, settle: Arc<dyn SettleStrategy>) -> Self {
        self.settle = Some(settle);
        self
    }

    pub fn build(self) -> Result<Arc<dyn ViewportReconciler>, RevealError> {
        Ok(Arc::new(ViewportReconcilerImpl {
            policy: self.policy,
            locator: self.locator.ok_or(RevealError::MissingPort("locator"))?,
            channel: self.channel.ok_or(RevealError::MissingPort("query channel"))?,
            actuator: self.actuator.ok_or(RevealError::MissingPort("gesture actuator"))?,
            surface: self.surface.ok_or(RevealError::MissingPort("surface metrics"))?,
            settle: self
                .settle
                .unwrap_or_else(|| Arc::new(DefaultSettleStrategy::default())),
        }))
    }
}

pub struct ViewportReconcilerImpl {
    policy: ScrollPolicy,
    locator: Arc<dyn ElementLocator>,
    channel: Arc<dyn PageQueryChannel>,
    actuator: Arc<dyn GestureActuator>,
    surface: Arc<dyn SurfaceMetrics>,
    settle: Arc<dyn SettleStrategy>,
}

impl ViewportReconcilerImpl {
    fn runtime(&self) -> RuntimeDeps<'_> {
        RuntimeDeps {
            locator: self.locator.as_ref(),
            channel: self.channel.as_ref(),
            actuator: self.actuator.as_ref(),
            surface: self.surface.as_ref(),
            settle: self.settle.as_ref(),
            policy: &self.policy,
        }
    }
}

#[async_trait]
impl ViewportReconciler for ViewportReconcilerImpl {
    async fn ensure_visible(&self, target: RevealTarget) -> Result<RevealReport, RevealError> {
        runner::ensure_visible(self.runtime(), target).await
    }

    async fn search(&self, descriptor: &ElementDescriptor) -> Result<RevealReport, RevealError> {
        runner::search(self.runtime(), descriptor).await
    }
}
