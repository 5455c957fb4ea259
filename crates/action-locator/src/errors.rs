//! Error types for the locator

use action_primitives::ActionError;
use autoweb_core_types::ErrorKind;
use thiserror::Error;

/// Locator error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No strategy produced a candidate
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Descriptor cannot be searched for
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The locate query failed or answered garbage
    #[error("Query error: {0}")]
    Query(String),
}

impl LocatorError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, LocatorError::Query(_))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LocatorError::ElementNotFound(_) => ErrorKind::NotFound,
            LocatorError::InvalidDescriptor(_) => ErrorKind::InvalidInput,
            LocatorError::Query(_) => ErrorKind::Query,
        }
    }
}

impl From<ActionError> for LocatorError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::Query(reason) | ActionError::Decode(reason) => LocatorError::Query(reason),
            other => LocatorError::Query(other.to_string()),
        }
    }
}
