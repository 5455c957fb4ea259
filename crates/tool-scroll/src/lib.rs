//! Viewport reconciliation.
//!
//! Decides whether a located element is visible and, when it is not, scrolls
//! it into view with swipe gestures:
//! - a single precise nudge when the element is already close to the viewport
//! - a bounded stepped search otherwise, re-locating the element on every step
//!   and scanning in a fixed direction cycle while it cannot be located
//!
//! Every scroll is followed by the lazy-load settle wait.

pub mod api;
pub mod errors;
pub mod model;
pub mod planner;
pub mod policy;

mod runner;

pub use api::{ViewportReconciler, ViewportReconcilerBuilder};
pub use errors::RevealError;
pub use model::{RevealPath, RevealReport, RevealTarget};
pub use planner::{Axis, ExploreDirection, ScrollPlan};
pub use policy::{ScrollPolicy, SwipeTimings};
