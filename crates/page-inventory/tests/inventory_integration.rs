use std::sync::Arc;

use action_primitives::fixture::{FixtureElement, FixturePage};
use autoweb_core_types::Viewport;
use page_inventory::{DefaultPageInventory, InventoryError, PageInventory};

fn shop_page() -> Arc<FixturePage> {
    Arc::new(
        FixturePage::new(Viewport::new(375.0, 667.0))
            .with_element(
                FixtureElement::new("button")
                    .with_id("buy-btn")
                    .with_title("Buy now and save a lot today")
                    .at(50.0, 50.0),
            )
            .with_element(FixtureElement::new("div").with_class("card featured").at(100.0, 1500.0))
            .with_element(FixtureElement::new("p").at(10.0, 10.0))
            .with_element(
                FixtureElement::new("a")
                    .with_href("https://shop.example.com/deals#top")
                    .with_title("Deals")
                    .at(20.0, 300.0),
            ),
    )
}

#[tokio::test]
async fn elements_are_listed_with_derived_identifiers() {
    let page = shop_page();
    let inventory = DefaultPageInventory::new(page.clone());

    let elements = inventory.list_elements().await.unwrap();

    let identifiers: Vec<&str> = elements.iter().map(|e| e.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["#buy-btn", ".card.featured"]);
    assert_eq!(elements[0].title, "Buy now and save a l");
    assert!(elements[0].is_visible);
    assert!(!elements[1].is_visible);
}

#[tokio::test]
async fn urls_differing_by_fragment_are_listed_once() {
    let page = Arc::new(
        FixturePage::new(Viewport::new(375.0, 667.0))
            .with_urls(
                "https://shop.example.com/",
                ["/cart#a", "/cart#b", "https://shop.example.com/cart", "javascript:void(0)"],
            )
            .with_element(FixtureElement::new("a").with_href("img/logo.png")),
    );
    let inventory = DefaultPageInventory::new(page);

    let urls = inventory.list_urls().await.unwrap();

    assert_eq!(
        urls,
        vec![
            "https://shop.example.com/cart",
            "https://shop.example.com/img/logo.png",
        ]
    );
}

#[tokio::test]
async fn link_lookup_ignores_fragments() {
    let inventory = DefaultPageInventory::new(shop_page());

    let descriptor = inventory
        .find_link("https://shop.example.com/deals#bottom")
        .await
        .unwrap();

    assert_eq!(descriptor.identifier, "a[href=\"https://shop.example.com/deals#top\"]");
    assert_eq!(descriptor.title, "Deals");
}

#[tokio::test]
async fn unknown_link_is_reported() {
    let inventory = DefaultPageInventory::new(shop_page());

    let err = inventory.find_link("https://elsewhere.example/").await.unwrap_err();

    assert_eq!(err, InventoryError::LinkNotFound("https://elsewhere.example/".into()));
}

#[tokio::test]
async fn query_failure_surfaces_as_error() {
    let page = shop_page();
    page.fail_queries(true);
    let inventory = DefaultPageInventory::new(page);

    let err = inventory.list_elements().await.unwrap_err();

    assert!(err.is_retryable());
}
