//! Element resolution against the live page

use std::sync::Arc;

use action_primitives::{decode, LocateResponse, PageQuery, PageQueryChannel};
use async_trait::async_trait;
use autoweb_core_types::{ElementDescriptor, ElementSnapshot, SearchTrace, TitleMatch};
use tracing::{debug, info, warn};

use crate::errors::LocatorError;
use crate::strategies::select_candidate;
use crate::types::{CandidateFacts, CandidatePool, LocateDiagnostics, StrategyReport};

/// Resolves descriptors to fresh snapshots.
#[async_trait]
pub trait ElementLocator: Send + Sync {
    /// Current snapshot of the element `descriptor` names. Read-only.
    async fn locate(&self, descriptor: &ElementDescriptor) -> Result<ElementSnapshot, LocatorError>;

    /// Per-strategy breakdown of how `identifier` resolves.
    async fn diagnose(&self, identifier: &str) -> Result<LocateDiagnostics, LocatorError>;
}

/// Default locator backed by a [`PageQueryChannel`].
pub struct DefaultElementLocator {
    channel: Arc<dyn PageQueryChannel>,
}

impl DefaultElementLocator {
    pub fn new(channel: Arc<dyn PageQueryChannel>) -> Self {
        Self { channel }
    }

    async fn gather(&self, identifier: &str) -> Result<CandidatePool, LocatorError> {
        if identifier.trim().is_empty() {
            return Err(LocatorError::InvalidDescriptor(
                "identifier is empty".to_string(),
            ));
        }
        let raw = self.channel.evaluate(&PageQuery::locate(identifier)).await?;
        let response: LocateResponse = decode(&raw)?;
        let pool = CandidatePool::from_response(response);
        for (strategy, error) in pool.strategy_errors() {
            debug!(%strategy, %error, "strategy failed; skipped");
        }
        Ok(pool)
    }
}

#[async_trait]
impl ElementLocator for DefaultElementLocator {
    async fn locate(&self, descriptor: &ElementDescriptor) -> Result<ElementSnapshot, LocatorError> {
        let pool = self.gather(&descriptor.identifier).await?;

        let Some((chosen, title_match)) = select_candidate(&pool, &descriptor.title) else {
            debug!(identifier = %descriptor.identifier, "no candidates");
            return Err(LocatorError::ElementNotFound(format!(
                "no element matches identifier \"{}\"",
                descriptor.identifier
            )));
        };

        if title_match == TitleMatch::Fallback {
            warn!(
                identifier = %descriptor.identifier,
                title = %descriptor.title,
                candidates = pool.len(),
                "no candidate carries the requested title; using the first"
            );
        }

        let trace = SearchTrace {
            search_method: chosen.strategy.name().to_string(),
            candidates_found: pool.len(),
            target_title: descriptor.title.clone(),
            title_match,
        };
        let snapshot = chosen
            .node
            .snapshot(descriptor.identifier.clone(), pool.viewport())
            .with_trace(trace);

        debug!(
            identifier = %descriptor.identifier,
            method = chosen.strategy.name(),
            candidates = pool.len(),
            x = snapshot.x,
            y = snapshot.y,
            visible = snapshot.is_visible,
            "located element"
        );
        Ok(snapshot)
    }

    async fn diagnose(&self, identifier: &str) -> Result<LocateDiagnostics, LocatorError> {
        if identifier.trim().is_empty() {
            return Err(LocatorError::InvalidDescriptor(
                "identifier is empty".to_string(),
            ));
        }
        let raw = self.channel.evaluate(&PageQuery::locate(identifier)).await?;
        let response: LocateResponse = decode(&raw)?;

        let strategies = response
            .strategies
            .iter()
            .map(|entry| StrategyReport {
                strategy: entry.strategy,
                matches: entry.matches.len(),
                error: entry.error.clone(),
            })
            .collect();
        let pool = CandidatePool::from_response(response);
        let viewport = *pool.viewport();
        let first = pool.candidates().first().map(|candidate| CandidateFacts {
            tag: candidate.node.tag.clone(),
            rect: candidate.node.rect,
            visibility: candidate.node.visibility.clone(),
            display: candidate.node.display.clone(),
            in_viewport: candidate.node.rect.intersects(&viewport),
            visible: candidate.node.is_visible(&viewport),
        });

        let diagnostics = LocateDiagnostics {
            identifier: identifier.to_string(),
            viewport,
            strategies,
            unique_candidates: pool.len(),
            first,
        };
        info!(
            identifier,
            unique = diagnostics.unique_candidates,
            "diagnosed identifier"
        );
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::fixture::{FixtureElement, FixturePage};
    use autoweb_core_types::Viewport;

    fn locator(page: FixturePage) -> (Arc<FixturePage>, DefaultElementLocator) {
        let page = Arc::new(page);
        (page.clone(), DefaultElementLocator::new(page))
    }

    #[tokio::test]
    async fn blank_identifier_is_rejected_without_querying() {
        let (page, locator) = locator(FixturePage::new(Viewport::new(375.0, 667.0)));
        let err = locator.locate(&ElementDescriptor::new(" ")).await.unwrap_err();
        assert!(matches!(err, LocatorError::InvalidDescriptor(_)));
        assert_eq!(page.query_count("locate"), 0);
    }

    #[tokio::test]
    async fn snapshot_carries_search_trace() {
        let (_, locator) = locator(
            FixturePage::new(Viewport::new(375.0, 667.0))
                .with_element(FixtureElement::new("div").with_class("tile").at(100.0, 100.0)),
        );
        let snapshot = locator.locate(&ElementDescriptor::new(".tile")).await.unwrap();
        let trace = snapshot.trace.unwrap();
        assert_eq!(trace.search_method, "selector");
        assert_eq!(trace.candidates_found, 1);
        assert_eq!(trace.title_match, TitleMatch::Untitled);
    }

    #[tokio::test]
    async fn page_errors_surface_as_query_errors() {
        let (page, locator) = locator(FixturePage::new(Viewport::new(375.0, 667.0)));
        page.fail_queries(true);
        let err = locator.locate(&ElementDescriptor::new("#x")).await.unwrap_err();
        assert_eq!(err, LocatorError::Query("page unavailable".into()));
        assert!(err.is_retryable());
    }
}
