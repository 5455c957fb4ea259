pub mod api;
pub mod errors;
pub mod model;
pub mod policy;

mod precheck;
mod runner;

pub use api::{ClickOrchestrator, ClickOrchestratorBuilder};
pub use errors::ClickError;
pub use model::{ClickAttemptState, ClickParams, ClickPath, ClickReport, ExecCtx};
pub use policy::ClickPolicy;
