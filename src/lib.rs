//! AutoWeb library
//!
//! Wires the locator, viewport reconciler, click orchestrator and page
//! inventory onto one page backend, and owns the YAML configuration.

pub mod autoweb;
pub mod config;
pub mod errors;

pub use autoweb::AutoWeb;
pub use config::Config;
pub use errors::{AutoWebError, ConfigError};
