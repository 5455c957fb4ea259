use autoweb_core_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClickError {
    #[error("tool disabled by policy")]
    Disabled,
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("target not found - {0}")]
    TargetNotFound(String),
    #[error("max retries reached ({attempts} attempts): {last_failure}")]
    RetriesExhausted { attempts: u32, last_failure: String },
    #[error("orchestrator port missing: {0}")]
    MissingPort(&'static str),
}

impl ClickError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClickError::Disabled | ClickError::MissingPort(_) => ErrorKind::Internal,
            ClickError::InvalidTarget(_) => ErrorKind::InvalidInput,
            ClickError::TargetNotFound(_) => ErrorKind::NotFound,
            ClickError::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
        }
    }
}
