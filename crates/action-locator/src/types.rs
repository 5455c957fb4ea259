//! Core types for the locator

use std::collections::HashSet;

use action_primitives::{LocateResponse, LocateStrategy, RawNode};
use autoweb_core_types::{Rect, Viewport};
use serde::{Deserialize, Serialize};

/// One unique page element gathered during a locate call.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node: RawNode,
    /// First strategy that matched the element
    pub strategy: LocateStrategy,
}

impl Candidate {
    pub fn title(&self) -> &str {
        &self.node.title
    }
}

/// Candidates pooled across strategies, one entry per element.
///
/// Order is strategy order, then document order within a strategy.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    viewport: Viewport,
    raw_matches: usize,
    strategy_errors: Vec<(LocateStrategy, String)>,
}

impl CandidatePool {
    pub fn from_response(response: LocateResponse) -> Self {
        let LocateResponse {
            viewport,
            mut strategies,
        } = response;
        strategies.sort_by_key(|entry| entry.strategy.rank());

        let mut pool = CandidatePool {
            viewport,
            ..Default::default()
        };
        let mut seen = HashSet::new();
        for entry in strategies {
            if let Some(error) = entry.error {
                pool.strategy_errors.push((entry.strategy, error));
            }
            for node in entry.matches {
                pool.raw_matches += 1;
                if seen.insert(node.key) {
                    pool.candidates.push(Candidate {
                        node,
                        strategy: entry.strategy,
                    });
                }
            }
        }
        pool
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Matches before de-duplication.
    pub fn raw_matches(&self) -> usize {
        self.raw_matches
    }

    /// Script errors swallowed by individual strategies.
    pub fn strategy_errors(&self) -> &[(LocateStrategy, String)] {
        &self.strategy_errors
    }
}

/// Per-strategy outcome of a diagnostic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: LocateStrategy,
    pub matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Facts about the first pooled candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFacts {
    pub tag: String,
    pub rect: Rect,
    pub visibility: String,
    pub display: String,
    pub in_viewport: bool,
    pub visible: bool,
}

/// Why an identifier does or does not resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateDiagnostics {
    pub identifier: String,
    pub viewport: Viewport,
    pub strategies: Vec<StrategyReport>,
    pub unique_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<CandidateFacts>,
}

impl LocateDiagnostics {
    /// Human-readable lines, one per strategy plus a summary.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .strategies
            .iter()
            .map(|report| match &report.error {
                Some(error) => format!("{}: failed ({})", report.strategy, error),
                None if report.matches > 0 => {
                    format!("{}: {} match(es)", report.strategy, report.matches)
                }
                None => format!("{}: no match", report.strategy),
            })
            .collect();
        lines.push(format!("unique candidates: {}", self.unique_candidates));
        if let Some(first) = &self.first {
            lines.push(format!(
                "first candidate: <{}> {}x{} at ({}, {}), visibility={}, display={}, in viewport={}, visible={}",
                first.tag,
                first.rect.width,
                first.rect.height,
                first.rect.left,
                first.rect.top,
                first.visibility,
                first.display,
                first.in_viewport,
                first.visible
            ));
        }
        lines
    }
}
