//! Error types for page primitives

use autoweb_core_types::ErrorKind;
use thiserror::Error;

/// Failures raised while talking to the page or the render surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The page script reported an error, or the channel could not run it
    #[error("Query failed: {0}")]
    Query(String),

    /// The page answered with something that is not the expected payload
    #[error("Malformed query response: {0}")]
    Decode(String),

    /// The actuator reported a failed tap or swipe
    #[error("Gesture failed: {0}")]
    Gesture(String),

    /// Loading or reloading the page failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The backend is gone (browser closed, page detached)
    #[error("Channel unavailable: {0}")]
    Unavailable(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ActionError::Query(_) | ActionError::Decode(_) | ActionError::Gesture(_)
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Gesture(_) => ErrorKind::Gesture,
            ActionError::Internal(_) => ErrorKind::Internal,
            _ => ErrorKind::Query,
        }
    }
}
