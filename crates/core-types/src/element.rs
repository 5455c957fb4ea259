use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Titles are clipped to this many characters wherever they are reported.
pub const MAX_TITLE_CHARS: usize = 20;

pub fn truncate_title(raw: &str) -> String {
    raw.chars().take(MAX_TITLE_CHARS).collect()
}

/// Symbolic reference to a page element: `#id`, `.class` or a bare tag/identifier,
/// plus an optional title used to disambiguate candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub identifier: String,
    #[serde(default)]
    pub title: String,
}

impl ElementDescriptor {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        self.title = truncate_title(title.as_ref());
        self
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.identifier.trim().is_empty()
    }
}

impl fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_title() {
            write!(f, "{} [{}]", self.identifier, self.title)
        } else {
            f.write_str(&self.identifier)
        }
    }
}

/// How the chosen candidate related to the requested title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMatch {
    Untitled,
    Exact,
    Partial,
    Fallback,
}

/// Diagnostic trail of a locate call. Informational only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrace {
    pub search_method: String,
    pub candidates_found: usize,
    pub target_title: String,
    pub title_match: TitleMatch,
}

/// Point-in-time observation of one element. Never updated; re-query instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub identifier: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<SearchTrace>,
}

impl ElementSnapshot {
    pub fn from_rect(identifier: impl Into<String>, title: &str, rect: &Rect, is_visible: bool) -> Self {
        let center = rect.center();
        Self {
            identifier: identifier.into(),
            title: truncate_title(title),
            x: center.x,
            y: center.y,
            width: rect.width,
            height: rect.height,
            is_visible,
            url: None,
            trace: None,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn descriptor(&self) -> ElementDescriptor {
        ElementDescriptor::new(self.identifier.clone()).with_title(&self.title)
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_trace(mut self, trace: SearchTrace) -> Self {
        self.trace = Some(trace);
        self
    }
}

/// Document scroll geometry, captured once as a baseline for a scroll search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageScrollSnapshot {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl PageScrollSnapshot {
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_clipped_by_characters() {
        let descriptor = ElementDescriptor::new("#buy").with_title("Продолжить покупку сейчас же");
        assert_eq!(descriptor.title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(truncate_title("short"), "short");
    }

    #[test]
    fn snapshot_serializes_with_camel_case_visibility() {
        let rect = Rect::new(30.0, 30.0, 40.0, 40.0);
        let snapshot = ElementSnapshot::from_rect("#buy-btn", "", &rect, true);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["isVisible"], serde_json::json!(true));
        assert_eq!(json["x"], serde_json::json!(50.0));
        assert!(json.get("url").is_none());
    }

    #[test]
    fn scroll_snapshot_tolerates_missing_fields() {
        let parsed: PageScrollSnapshot =
            serde_json::from_str(r#"{"scrollTop": 120, "scrollHeight": 3000, "clientHeight": 667}"#)
                .unwrap();
        assert_eq!(parsed.scroll_top, 120.0);
        assert_eq!(parsed.max_scroll_top(), 2333.0);
        assert_eq!(parsed.scroll_left, 0.0);
    }
}
