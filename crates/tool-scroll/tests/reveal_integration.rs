//! Reveal behavior against an in-memory page. Runs on paused time so settle
//! waits complete instantly.

use std::sync::Arc;

use action_locator::{DefaultElementLocator, ElementLocator};
use action_primitives::fixture::{FixtureElement, FixturePage};
use autoweb_core_types::{ElementDescriptor, Viewport};
use tool_scroll::{
    RevealError, RevealPath, RevealTarget, ScrollPolicy, ViewportReconciler,
    ViewportReconcilerBuilder,
};

fn phone() -> Viewport {
    Viewport::new(375.0, 667.0)
}

fn reconciler(page: &Arc<FixturePage>) -> (Arc<dyn ElementLocator>, Arc<dyn ViewportReconciler>) {
    let locator: Arc<dyn ElementLocator> = Arc::new(DefaultElementLocator::new(page.clone()));
    let reconciler = ViewportReconcilerBuilder::new(ScrollPolicy::default())
        .with_locator(locator.clone())
        .with_channel(page.clone())
        .with_actuator(page.clone())
        .with_surface(page.clone())
        .build()
        .unwrap();
    (locator, reconciler)
}

#[tokio::test(start_paused = true)]
async fn visible_element_needs_no_gesture() {
    let page = Arc::new(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("button").with_id("buy-btn").at(50.0, 50.0)),
    );
    let (_, reconciler) = reconciler(&page);

    let report = reconciler
        .ensure_visible(RevealTarget::Descriptor(ElementDescriptor::new("#buy-btn")))
        .await
        .unwrap();

    assert_eq!(report.path, RevealPath::AlreadyVisible);
    assert_eq!(report.swipes, 0);
    assert!(page.swipes().is_empty());
    assert_eq!(page.query_count("load_status"), 0);
}

#[tokio::test(start_paused = true)]
async fn far_element_is_reached_by_clamped_vertical_steps() {
    let page = Arc::new(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("button").with_id("buy-btn").at(50.0, 2000.0)),
    );
    let (locator, reconciler) = reconciler(&page);
    let snapshot = locator
        .locate(&ElementDescriptor::new("#buy-btn"))
        .await
        .unwrap();
    assert!(!snapshot.is_visible);

    let report = reconciler.ensure_visible(snapshot.into()).await.unwrap();

    assert_eq!(report.path, RevealPath::Stepped);
    assert!(report.swipes >= 1);
    assert!(report.swipes <= ScrollPolicy::default().max_scroll_steps);
    assert_eq!(report.baseline.unwrap().scroll_top, 0.0);
    let swipes = page.swipes();
    assert_eq!(swipes.len() as u32, report.swipes);
    for swipe in swipes {
        let (dx, dy) = swipe.delta();
        assert_eq!(dx, 0.0);
        assert!(dy < 0.0, "content should move up");
        assert!((100.0..=300.0).contains(&dy.abs()));
    }
    let now_visible = locator
        .locate(&ElementDescriptor::new("#buy-btn"))
        .await
        .unwrap();
    assert!(now_visible.is_visible);
}

#[tokio::test(start_paused = true)]
async fn near_element_gets_one_precise_swipe() {
    let page = Arc::new(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_id("promo").at(187.5, 900.0)),
    );
    let (_, reconciler) = reconciler(&page);

    let report = reconciler
        .ensure_visible(ElementDescriptor::new("#promo").into())
        .await
        .unwrap();

    assert_eq!(report.path, RevealPath::Precise);
    assert_eq!(report.swipes, 1);
    let swipes = page.swipes();
    assert_eq!(swipes.len(), 1);
    assert_eq!(swipes[0].delta(), (0.0, -100.0));
    assert_eq!(page.query_count("load_status"), 8);
}

#[tokio::test(start_paused = true)]
async fn dead_zone_reports_no_scroll_needed() {
    let page = Arc::new(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_id("ghost").hidden().at(190.0, 340.0)),
    );
    let (_, reconciler) = reconciler(&page);

    let report = reconciler
        .ensure_visible(ElementDescriptor::new("#ghost").into())
        .await
        .unwrap();

    assert_eq!(report.path, RevealPath::NoScroll);
    assert_eq!(report.outcome().to_tagged(), "SUCCESS: no scroll needed");
    assert!(page.swipes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn missing_element_explores_until_step_limit() {
    let page = Arc::new(FixturePage::new(phone()));
    let (_, reconciler) = reconciler(&page);

    let err = reconciler
        .search(&ElementDescriptor::new("#missing"))
        .await
        .unwrap_err();

    assert!(err.is_never_found());
    let swipes = page.swipes();
    assert_eq!(swipes.len(), 15);
    let deltas: Vec<(f64, f64)> = swipes.iter().take(4).map(|s| s.delta()).collect();
    assert_eq!(
        deltas,
        vec![(0.0, -150.0), (0.0, 150.0), (-120.0, 0.0), (120.0, 0.0)]
    );
    assert_eq!(page.query_count("scroll_info"), 1);
}

#[tokio::test(start_paused = true)]
async fn styled_hidden_far_element_hits_step_limit() {
    let page = Arc::new(
        FixturePage::new(phone())
            .with_element(FixtureElement::new("div").with_id("ghost").display_none().at(50.0, 5000.0)),
    );
    let (_, reconciler) = reconciler(&page);

    let err = reconciler
        .ensure_visible(ElementDescriptor::new("#ghost").into())
        .await
        .unwrap_err();

    assert_eq!(err, RevealError::StepLimit { steps: 15 });
    assert_eq!(page.swipes().len(), 15);
}

#[tokio::test(start_paused = true)]
async fn lazily_loaded_element_is_found_after_scrolling() {
    let page = Arc::new(
        FixturePage::new(phone()).with_element(
            FixtureElement::new("img")
                .with_class("thumb")
                .lazy(3)
                .at(100.0, 300.0),
        ),
    );
    let (_, reconciler) = reconciler(&page);

    let report = reconciler
        .search(&ElementDescriptor::new(".thumb"))
        .await
        .unwrap();

    assert_eq!(report.swipes, 3);
    assert_eq!(report.steps, 3);
}

#[tokio::test(start_paused = true)]
async fn query_failures_are_tolerated_and_reported() {
    let page = Arc::new(FixturePage::new(phone()));
    page.fail_queries(true);
    let (_, reconciler) = reconciler(&page);

    let err = reconciler
        .search(&ElementDescriptor::new("#buy-btn"))
        .await
        .unwrap_err();

    match err {
        RevealError::NeverFound { steps, last_error } => {
            assert_eq!(steps, 15);
            assert_eq!(last_error.as_deref(), Some("page unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
