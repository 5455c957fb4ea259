use std::sync::Arc;

use action_locator::ElementLocator;
use action_primitives::GestureActuator;
use async_trait::async_trait;
use tool_scroll::ViewportReconciler;

use crate::errors::ClickError;
use crate::model::{ClickParams, ClickReport, ExecCtx};
use crate::policy::ClickPolicy;
use crate::runner::{execute, RuntimeDeps};

/// Resolves, reveals and taps an element, retrying the tap with bounds.
///
/// Every failure is folded into the returned report; callers read
/// `report.ok` or the tagged outcome.
#[async_trait]
pub trait ClickOrchestrator: Send + Sync {
    async fn click(&self, ctx: ExecCtx, params: ClickParams) -> ClickReport;
}

pub struct ClickOrchestratorBuilder {
    policy: ClickPolicy,
    locator: Option<Arc<dyn ElementLocator>>,
    reconciler: Option<Arc<dyn ViewportReconciler>>,
    actuator: Option<Arc<dyn GestureActuator>>,
}

impl ClickOrchestratorBuilder {
    pub fn new(policy: ClickPolicy) -> Self {
        Self {
            policy,
            locator: None,
            reconciler: None,
            actuator: None,
        }
    }

    pub fn with_locator(mut self, port: Arc<dyn ElementLocator>) -> Self {
        self.locator = Some(port);
        self
    }

    pub fn with_reconciler(mut self, port: Arc<dyn ViewportReconciler>) -> Self {
        self.reconciler = Some(port);
        self
    }

    pub fn with_actuator(mut self, port: Arc<dyn GestureActuator>) -> Self {
        self.actuator = Some(port);
        self
    }

    pub fn build(self) -> Result<Arc<dyn ClickOrchestrator>, ClickError> {
        Ok(Arc::new(ClickOrchestratorImpl {
            policy: self.policy,
            locator: self.locator.ok_or(ClickError::MissingPort("locator"))?,
            reconciler: self.reconciler.ok_or(ClickError::MissingPort("reconciler"))?,
            actuator: self.actuator.ok_or(ClickError::MissingPort("gesture actuator"))?,
        }))
    }
}

pub struct ClickOrchestratorImpl {
    policy: ClickPolicy,
    locator: Arc<dyn ElementLocator>,
    reconciler: Arc<dyn ViewportReconciler>,
    actuator: Arc<dyn GestureActuator>,
}

#[async_trait]
impl ClickOrchestrator for ClickOrchestratorImpl {
    async fn click(&self, ctx: ExecCtx, params: ClickParams) -> ClickReport {
        let runtime = RuntimeDeps {
            locator: self.locator.as_ref(),
            reconciler: self.reconciler.as_ref(),
            actuator: self.actuator.as_ref(),
            policy: &self.policy,
        };
        execute(&ctx, params, runtime).await
    }
}
