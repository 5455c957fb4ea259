//! Settle waits run after every scroll gesture

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::debug;

use crate::ports::PageQueryChannel;
use crate::query::{decode, PageQuery};
use crate::types::LoadStatus;

/// Timing of the lazy-load settle wait.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyLoadPolicy {
    pub initial_delay_ms: u64,
    pub poll_interval_ms: u64,
    pub max_polls: u32,
}

impl Default for LazyLoadPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            poll_interval_ms: 200,
            max_polls: 8,
        }
    }
}

impl LazyLoadPolicy {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Wall time one settle always takes.
    pub fn total_budget(&self) -> Duration {
        self.initial_delay() + self.poll_interval() * self.max_polls
    }
}

/// What was observed while settling. Informational only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettleReport {
    pub polls: u32,
    pub failed_polls: u32,
    pub last_status: Option<LoadStatus>,
}

/// Waits for content revealed by a scroll to arrive.
#[async_trait]
pub trait SettleStrategy: Send + Sync {
    async fn settle(&self, channel: &dyn PageQueryChannel) -> SettleReport;
}

/// Fixed settle time: an initial delay, then `max_polls` status samples spaced
/// `poll_interval` apart. The samples are logged but never end the wait early.
#[derive(Clone, Debug, Default)]
pub struct DefaultSettleStrategy {
    pub policy: LazyLoadPolicy,
}

impl DefaultSettleStrategy {
    pub fn new(policy: LazyLoadPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl SettleStrategy for DefaultSettleStrategy {
    async fn settle(&self, channel: &dyn PageQueryChannel) -> SettleReport {
        let mut report = SettleReport::default();
        sleep(self.policy.initial_delay()).await;

        for poll in 1..=self.policy.max_polls {
            let sampled = match channel.evaluate(&PageQuery::LoadStatus).await {
                Ok(raw) => decode::<LoadStatus>(&raw),
                Err(err) => Err(err),
            };
            match sampled {
                Ok(status) => {
                    debug!(
                        poll,
                        max_polls = self.policy.max_polls,
                        ready = status.document_ready,
                        loading_images = status.loading_images,
                        lazy_elements = status.lazy_elements,
                        total_elements = status.total_elements,
                        "lazy-load status"
                    );
                    report.last_status = Some(status);
                }
                Err(err) => {
                    debug!(poll, error = %err, "lazy-load status unavailable");
                    report.failed_polls += 1;
                }
            }
            report.polls = poll;
            sleep(self.policy.poll_interval()).await;
        }

        debug!(polls = report.polls, "lazy-load settle finished");
        report
    }
}
