use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use autoweb_core_types::{
    ActionId, ElementDescriptor, ElementSnapshot, ErrorKind, Outcome, Point,
};
use tool_scroll::RevealReport;

use crate::errors::ClickError;

/// Execution context supplied by the caller.
#[derive(Clone, Debug, Default)]
pub struct ExecCtx {
    pub action_id: ActionId,
}

impl ExecCtx {
    pub fn new(action_id: ActionId) -> Self {
        Self { action_id }
    }
}

/// Parameters for executing a click.
#[derive(Clone, Debug)]
pub struct ClickParams {
    pub descriptor: ElementDescriptor,
    /// Snapshot the caller already holds, e.g. from an element scan.
    pub hint: Option<ElementSnapshot>,
}

impl ClickParams {
    pub fn new(descriptor: ElementDescriptor) -> Self {
        Self {
            descriptor,
            hint: None,
        }
    }

    pub fn from_snapshot(snapshot: ElementSnapshot) -> Self {
        Self {
            descriptor: snapshot.descriptor(),
            hint: Some(snapshot),
        }
    }
}

/// How the target was made clickable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPath {
    /// Visible on arrival.
    Direct,
    /// Located but hidden; the reconciler scrolled it.
    Reconciled,
    /// Not located; found by the stepped search.
    Searched,
}

/// Retry bookkeeping for one click. `attempt_count` only grows.
#[derive(Clone, Debug)]
pub struct ClickAttemptState {
    pub attempt_count: u32,
    pub target: ElementDescriptor,
    pub last_failure: Option<String>,
}

impl ClickAttemptState {
    pub fn new(target: ElementDescriptor) -> Self {
        Self {
            attempt_count: 0,
            target,
            last_failure: None,
        }
    }

    pub fn begin_attempt(&mut self) -> u32 {
        self.attempt_count += 1;
        self.attempt_count
    }

    pub fn record_failure(&mut self, reason: impl Into<String>) {
        self.last_failure = Some(reason.into());
    }

    pub fn exhausted(&self, max_attempts: u32) -> bool {
        self.attempt_count >= max_attempts
    }
}

/// Outcome of the click execution.
#[derive(Clone, Debug, Serialize)]
pub struct ClickReport {
    pub action_id: ActionId,
    pub ok: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ClickPath>,
    pub attempts: u32,
    pub taps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tapped_at: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub outcome: Outcome,
    #[serde(skip)]
    clock: Instant,
}

impl ClickReport {
    pub fn new(action_id: ActionId) -> Self {
        let now = Utc::now();
        Self {
            action_id,
            ok: false,
            started_at: now,
            finished_at: now,
            latency_ms: 0,
            path: None,
            attempts: 0,
            taps: 0,
            tapped_at: None,
            reveal: None,
            error_kind: None,
            outcome: Outcome::failure("not started"),
            clock: Instant::now(),
        }
    }

    pub fn succeed(self, detail: impl Into<String>) -> Self {
        let mut report = self;
        report.ok = true;
        report.error_kind = None;
        report.outcome = Outcome::success(detail);
        report.finish()
    }

    pub fn fail(self, err: &ClickError) -> Self {
        let mut report = self;
        report.ok = false;
        report.error_kind = Some(err.kind());
        report.outcome = Outcome::failure(err.to_string());
        report.finish()
    }

    /// `SUCCESS: ...` / `ERROR: ...` form for string-protocol callers.
    pub fn tagged(&self) -> String {
        self.outcome.to_tagged()
    }

    fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self.latency_ms = self.clock.elapsed().as_millis() as u64;
        self
    }
}
