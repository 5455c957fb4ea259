use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickPolicy {
    pub enabled: bool,
    /// Resolve-and-tap attempts per click, including the first.
    pub max_retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl ClickPolicy {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ClickPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retry_attempts: 5,
            retry_delay_ms: 500,
        }
    }
}
