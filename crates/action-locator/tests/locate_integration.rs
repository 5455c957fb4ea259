//! Locator behavior against an in-memory page.

use std::sync::Arc;

use action_locator::{DefaultElementLocator, ElementLocator, LocatorError};
use action_primitives::fixture::{FixtureElement, FixturePage};
use action_primitives::LocateStrategy;
use autoweb_core_types::{ElementDescriptor, TitleMatch, Viewport};

fn phone() -> Viewport {
    Viewport::new(375.0, 667.0)
}

fn locator_for(page: FixturePage) -> DefaultElementLocator {
    DefaultElementLocator::new(Arc::new(page))
}

#[tokio::test]
async fn unmatched_descriptor_is_not_found() {
    let locator = locator_for(
        FixturePage::new(phone()).with_element(FixtureElement::new("div").with_id("other")),
    );

    let err = locator
        .locate(&ElementDescriptor::new("#missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, LocatorError::ElementNotFound(_)));
    assert!(err.to_string().contains("#missing"));
}

#[tokio::test]
async fn visible_target_is_reported_at_its_center() {
    let locator = locator_for(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("button").with_id("buy-btn").at(50.0, 50.0)),
    );

    let snapshot = locator
        .locate(&ElementDescriptor::new("#buy-btn"))
        .await
        .unwrap();

    assert!(snapshot.is_visible);
    assert_eq!((snapshot.x, snapshot.y), (50.0, 50.0));
    assert_eq!(snapshot.identifier, "#buy-btn");
}

#[tokio::test]
async fn untitled_lookup_is_deterministic() {
    let locator = locator_for(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_class("card").with_title("First").at(50.0, 100.0))
            .with_element(FixtureElement::new("div").with_class("card").with_title("Second").at(50.0, 200.0)),
    );
    let descriptor = ElementDescriptor::new(".card");

    let first = locator.locate(&descriptor).await.unwrap();
    let again = locator.locate(&descriptor).await.unwrap();

    assert_eq!(first.title, "First");
    assert_eq!(first, again);
}

#[tokio::test]
async fn exact_title_wins_over_pool_order() {
    let locator = locator_for(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_class("card").with_title("Play").at(50.0, 100.0))
            .with_element(FixtureElement::new("div").with_class("card").with_title("Buy").at(50.0, 200.0)),
    );

    let snapshot = locator
        .locate(&ElementDescriptor::new(".card").with_title("Buy"))
        .await
        .unwrap();

    assert_eq!(snapshot.y, 200.0);
    assert_eq!(snapshot.trace.unwrap().title_match, TitleMatch::Exact);
}

#[tokio::test]
async fn element_matched_by_several_strategies_is_one_candidate() {
    let locator = locator_for(
        FixturePage::new(phone())
            .with_element(
                FixtureElement::new("div")
                    .with_id("promo")
                    .with_class("promo")
                    .with_attr("data-id", "promo")
                    .at(50.0, 100.0),
            )
            .with_element(FixtureElement::new("div").with_class("promo-banner").at(50.0, 300.0)),
    );

    let snapshot = locator
        .locate(&ElementDescriptor::new("promo"))
        .await
        .unwrap();
    let trace = snapshot.trace.unwrap();

    assert_eq!(trace.candidates_found, 2);
    assert_eq!(trace.search_method, "element-by-id");
    assert_eq!(snapshot.y, 100.0);
}

#[tokio::test]
async fn diagnose_breaks_down_strategies() {
    let locator = locator_for(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_class("tile").at(50.0, 1000.0)),
    );

    let diagnostics = locator.diagnose(".tile").await.unwrap();

    let class_name = diagnostics
        .strategies
        .iter()
        .find(|report| report.strategy == LocateStrategy::ClassName)
        .unwrap();
    assert_eq!(class_name.matches, 1);
    assert_eq!(diagnostics.unique_candidates, 1);
    let first = diagnostics.first.as_ref().unwrap();
    assert!(!first.in_viewport);
    assert!(!first.visible);
    assert!(diagnostics
        .lines()
        .iter()
        .any(|line| line == "unique candidates: 1"));
}
