//! Page-facing primitives for AutoWeb
//!
//! This crate owns everything that touches the live page:
//! - the [`PageQueryChannel`], [`GestureActuator`], [`SurfaceMetrics`] and
//!   [`PageNavigator`] ports a backend implements
//! - the introspection queries and the JSON payloads they return
//! - eased swipe paths for actuators that synthesize touch sequences
//! - the fixed lazy-load settle wait run after every scroll

pub mod errors;
pub mod gesture;
mod ports;
mod query;
mod scripts;
pub mod types;
mod waiting;

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

pub use errors::*;
pub use gesture::{ease_in_out_cubic, swipe_path, TouchSample, SWIPE_MOVE_STEPS, TAP_HOLD};
pub use ports::*;
pub use query::*;
pub use types::*;
pub use waiting::*;
