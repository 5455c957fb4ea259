use std::fmt;

use action_primitives::ActionError;
use chromiumoxide::error::CdpError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// High-level error categories surfaced by the adapter.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterErrorKind {
    #[error("browser launch failed")]
    Launch,
    #[error("cdp i/o failure")]
    CdpIo,
    #[error("command timed out")]
    Timeout,
    #[error("script evaluation failed")]
    Evaluation,
    #[error("navigation failed")]
    Navigation,
    #[error("internal error")]
    Internal,
}

/// Adapter failure with an optional human hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub hint: Option<String>,
    pub retriable: bool,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for AdapterError {}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind) -> Self {
        Self {
            kind,
            hint: None,
            retriable: matches!(
                kind,
                AdapterErrorKind::CdpIo | AdapterErrorKind::Timeout | AdapterErrorKind::Evaluation
            ),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retriable
    }

    pub(crate) fn cdp(kind: AdapterErrorKind, err: CdpError) -> Self {
        Self::new(kind).with_hint(err.to_string())
    }
}

impl From<AdapterError> for ActionError {
    fn from(err: AdapterError) -> Self {
        let reason = err.to_string();
        match err.kind {
            AdapterErrorKind::Evaluation | AdapterErrorKind::Timeout => ActionError::Query(reason),
            AdapterErrorKind::Navigation => ActionError::Navigation(reason),
            AdapterErrorKind::Launch | AdapterErrorKind::CdpIo => ActionError::Unavailable(reason),
            AdapterErrorKind::Internal => ActionError::Internal(reason),
        }
    }
}
