//! Error types for page inventories

use action_primitives::ActionError;
use autoweb_core_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The inventory query failed or answered garbage
    #[error("Inventory query failed: {0}")]
    Query(String),

    /// No anchor on the page points at the requested URL
    #[error("no link found for url {0}")]
    LinkNotFound(String),
}

impl InventoryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, InventoryError::Query(_))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::Query(_) => ErrorKind::Query,
            InventoryError::LinkNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<ActionError> for InventoryError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::Query(reason) | ActionError::Decode(reason) => InventoryError::Query(reason),
            other => InventoryError::Query(other.to_string()),
        }
    }
}
