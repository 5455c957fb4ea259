use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Distances and bounds for revealing an element. Distances are CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPolicy {
    /// Upper bound on iterations of the stepped search.
    pub max_scroll_steps: u32,
    pub min_scroll_distance: f64,
    pub max_scroll_distance: f64,
    /// Elements whose center lies within `[-before, +after]` viewport sizes on
    /// both axes get a single precise scroll instead of a stepped search.
    pub near_before_factor: f64,
    pub near_after_factor: f64,
    pub precise_max_distance: f64,
    /// Precise deltas smaller than this are not scrolled.
    pub precise_dead_zone: f64,
    pub exploratory_vertical_distance: f64,
    pub exploratory_horizontal_distance: f64,
    pub timings: SwipeTimings,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            max_scroll_steps: 15,
            min_scroll_distance: 100.0,
            max_scroll_distance: 300.0,
            near_before_factor: 1.5,
            near_after_factor: 2.5,
            precise_max_distance: 100.0,
            precise_dead_zone: 50.0,
            exploratory_vertical_distance: 150.0,
            exploratory_horizontal_distance: 120.0,
            timings: SwipeTimings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeTimings {
    pub precise_ms: u64,
    pub step_ms: u64,
    pub exploratory_ms: u64,
}

impl SwipeTimings {
    pub fn precise(&self) -> Duration {
        Duration::from_millis(self.precise_ms)
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn exploratory(&self) -> Duration {
        Duration::from_millis(self.exploratory_ms)
    }
}

impl Default for SwipeTimings {
    fn default() -> Self {
        Self {
            precise_ms: 200,
            step_ms: 300,
            exploratory_ms: 250,
        }
    }
}
