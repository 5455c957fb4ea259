//! Payloads returned by the page introspection queries

use autoweb_core_types::{is_visible, ElementSnapshot, Rect, Viewport};
use serde::{Deserialize, Serialize};

use crate::query::LocateStrategy;

/// One element as observed by a page script.
///
/// `key` is stable per element within a single query, so candidates matched by
/// several strategies can be recognised as the same node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub key: u64,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub id: String,
    /// `None` when the element's `className` is not a string (SVG).
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub title: String,
    pub rect: Rect,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RawNode {
    pub fn is_visible(&self, viewport: &Viewport) -> bool {
        is_visible(&self.rect, &self.visibility, &self.display, viewport)
    }

    pub fn snapshot(&self, identifier: impl Into<String>, viewport: &Viewport) -> ElementSnapshot {
        ElementSnapshot::from_rect(identifier, &self.title, &self.rect, self.is_visible(viewport))
            .with_url(self.href.clone())
    }
}

/// Matches produced by one locate strategy. `error` carries a swallowed script error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyMatches {
    pub strategy: LocateStrategy,
    #[serde(default)]
    pub matches: Vec<RawNode>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocateResponse {
    pub viewport: Viewport,
    #[serde(default)]
    pub strategies: Vec<StrategyMatches>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementsResponse {
    pub viewport: Viewport,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlsResponse {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Diagnostic document state sampled while lazy content settles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadStatus {
    pub document_ready: bool,
    pub loading_images: u32,
    pub lazy_elements: u32,
    pub total_elements: u32,
    pub timestamp: f64,
}

/// Anchor found for a URL, with a selector that addresses it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkResponse {
    pub found: bool,
    pub identifier: Option<String>,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_node_snapshot_uses_page_visibility() {
        let node: RawNode = serde_json::from_str(
            r#"{"key": 3, "tag": "button", "id": "buy-btn", "className": "cta",
                "title": "Buy now", "rect": {"left": 30, "top": 30, "width": 40, "height": 40},
                "visibility": "visible", "display": "inline-block", "href": null}"#,
        )
        .unwrap();
        let snapshot = node.snapshot("#buy-btn", &Viewport::new(375.0, 667.0));
        assert!(snapshot.is_visible);
        assert_eq!((snapshot.x, snapshot.y), (50.0, 50.0));
        assert_eq!(snapshot.title, "Buy now");
    }

    #[test]
    fn load_status_defaults_missing_counts() {
        let status: LoadStatus = serde_json::from_str(r#"{"documentReady": true}"#).unwrap();
        assert!(status.document_ready);
        assert_eq!(status.loading_images, 0);
    }
}
