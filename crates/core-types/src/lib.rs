//! Shared primitives for the AutoWeb targeting crates.
//!
//! Geometry, element descriptors and snapshots, and the tagged
//! `SUCCESS:` / `ERROR:` outcome protocol used at the host boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod element;
mod geometry;
mod outcome;

pub use element::{
    truncate_title, ElementDescriptor, ElementSnapshot, PageScrollSnapshot, SearchTrace,
    TitleMatch, MAX_TITLE_CHARS,
};
pub use geometry::{is_visible, js_round, Point, Rect, Viewport};
pub use outcome::{Outcome, ERROR_TAG, SUCCESS_TAG};

/// Broad failure classes shared by every layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("not found")]
    NotFound,
    #[error("not visible")]
    Invisible,
    #[error("query failed")]
    Query,
    #[error("gesture failed")]
    Gesture,
    #[error("step limit reached")]
    StepLimit,
    #[error("retries exhausted")]
    RetriesExhausted,
    #[error("invalid input")]
    InvalidInput,
    #[error("internal error")]
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Invisible => "invisible",
            ErrorKind::Query => "query",
            ErrorKind::Gesture => "gesture",
            ErrorKind::StepLimit => "step_limit",
            ErrorKind::RetriesExhausted => "retries_exhausted",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Correlates log lines and reports for one top-level operation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
