use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ActionError;
use crate::scripts;

/// Candidate search strategies, in pooling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocateStrategy {
    ElementById,
    Selector,
    ClassName,
    DataId,
    DataGameId,
    IdContains,
    ClassContains,
}

impl LocateStrategy {
    pub const ORDER: [LocateStrategy; 7] = [
        LocateStrategy::ElementById,
        LocateStrategy::Selector,
        LocateStrategy::ClassName,
        LocateStrategy::DataId,
        LocateStrategy::DataGameId,
        LocateStrategy::IdContains,
        LocateStrategy::ClassContains,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LocateStrategy::ElementById => "element-by-id",
            LocateStrategy::Selector => "selector",
            LocateStrategy::ClassName => "class-name",
            LocateStrategy::DataId => "data-id",
            LocateStrategy::DataGameId => "data-game-id",
            LocateStrategy::IdContains => "id-contains",
            LocateStrategy::ClassContains => "class-contains",
        }
    }

    /// Position in [`Self::ORDER`].
    pub fn rank(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|candidate| candidate == self)
            .unwrap_or(Self::ORDER.len())
    }

    pub fn applies_to(&self, identifier: &str) -> bool {
        match self {
            LocateStrategy::ElementById => {
                !identifier.starts_with('.') && !identifier.starts_with('#')
            }
            LocateStrategy::ClassName => identifier.starts_with('.') && identifier.len() > 1,
            _ => true,
        }
    }

    /// Attribute selector used by the fallback strategies.
    pub fn attribute_selector(&self, identifier: &str) -> Option<String> {
        let value = css_string(identifier);
        match self {
            LocateStrategy::DataId => Some(format!("[data-id=\"{value}\"]")),
            LocateStrategy::DataGameId => Some(format!("[data-game-id=\"{value}\"]")),
            LocateStrategy::IdContains => Some(format!("[id*=\"{value}\"]")),
            LocateStrategy::ClassContains => Some(format!("[class*=\"{value}\"]")),
            _ => None,
        }
    }

    /// Strategies that run for `identifier`, in order.
    pub fn plan(identifier: &str) -> Vec<LocateStrategy> {
        Self::ORDER
            .into_iter()
            .filter(|strategy| strategy.applies_to(identifier))
            .collect()
    }
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn css_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Introspection queries understood by every [`crate::PageQueryChannel`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageQuery {
    Locate { identifier: String },
    ScrollInfo,
    LoadStatus,
    ListElements,
    ListUrls,
    FindLink { url: String },
}

impl PageQuery {
    pub fn locate(identifier: impl Into<String>) -> Self {
        PageQuery::Locate {
            identifier: identifier.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageQuery::Locate { .. } => "locate",
            PageQuery::ScrollInfo => "scroll_info",
            PageQuery::LoadStatus => "load_status",
            PageQuery::ListElements => "list_elements",
            PageQuery::ListUrls => "list_urls",
            PageQuery::FindLink { .. } => "find_link",
        }
    }

    /// Self-contained script text; evaluates to a JSON string or `ERROR: ...`.
    pub fn script(&self) -> String {
        match self {
            PageQuery::Locate { identifier } => scripts::locate(identifier),
            PageQuery::ScrollInfo => scripts::scroll_info(),
            PageQuery::LoadStatus => scripts::load_status(),
            PageQuery::ListElements => scripts::list_elements(),
            PageQuery::ListUrls => scripts::list_urls(),
            PageQuery::FindLink { url } => scripts::find_link(url),
        }
    }
}

/// Decodes a query result, mapping an `ERROR:` answer to [`ActionError::Query`].
///
/// Some evaluators hand back the script's return value JSON-encoded a second
/// time; a string-wrapped payload is unwrapped once.
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, ActionError> {
    let trimmed = payload.trim();
    if let Some(reason) = page_error(trimmed) {
        return Err(ActionError::Query(reason));
    }
    match serde_json::from_str::<T>(trimmed) {
        Ok(value) => Ok(value),
        Err(err) => match serde_json::from_str::<String>(trimmed) {
            Ok(inner) => {
                if let Some(reason) = page_error(inner.trim()) {
                    return Err(ActionError::Query(reason));
                }
                serde_json::from_str::<T>(&inner).map_err(|err| ActionError::Decode(err.to_string()))
            }
            Err(_) => Err(ActionError::Decode(err.to_string())),
        },
    }
}

fn page_error(text: &str) -> Option<String> {
    text.strip_prefix("ERROR")
        .map(|rest| rest.trim_start_matches(':').trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoadStatus;

    #[test]
    fn id_lookup_skips_prefixed_identifiers() {
        assert_eq!(
            LocateStrategy::plan("#buy-btn"),
            vec![
                LocateStrategy::Selector,
                LocateStrategy::DataId,
                LocateStrategy::DataGameId,
                LocateStrategy::IdContains,
                LocateStrategy::ClassContains,
            ]
        );
        assert_eq!(LocateStrategy::plan(".card")[1], LocateStrategy::ClassName);
        assert_eq!(LocateStrategy::plan("buy")[0], LocateStrategy::ElementById);
    }

    #[test]
    fn attribute_selectors_escape_quotes() {
        assert_eq!(
            LocateStrategy::DataId.attribute_selector("a\"b").as_deref(),
            Some("[data-id=\"a\\\"b\"]")
        );
        assert_eq!(LocateStrategy::Selector.attribute_selector("x"), None);
    }

    #[test]
    fn strategies_serialize_kebab_case() {
        let json = serde_json::to_string(&LocateStrategy::DataGameId).unwrap();
        assert_eq!(json, "\"data-game-id\"");
        assert_eq!(LocateStrategy::ClassContains.rank(), 6);
    }

    #[test]
    fn decode_maps_page_errors() {
        let err = decode::<LoadStatus>("ERROR: document is not defined").unwrap_err();
        assert_eq!(err, ActionError::Query("document is not defined".into()));
    }

    #[test]
    fn decode_unwraps_string_encoded_payloads() {
        let status: LoadStatus = decode(r#""{\"documentReady\":true,\"loadingImages\":2}""#).unwrap();
        assert_eq!(status.loading_images, 2);
        let nested = decode::<LoadStatus>(r#""ERROR: boom""#).unwrap_err();
        assert_eq!(nested, ActionError::Query("boom".into()));
    }

    #[test]
    fn decode_reports_malformed_payloads() {
        assert!(matches!(
            decode::<LoadStatus>("not json"),
            Err(ActionError::Decode(_))
        ));
    }

    #[test]
    fn scripts_embed_identifiers_as_literals() {
        let script = PageQuery::locate("it's").script();
        assert!(script.contains("\"it's\""));
        assert!(script.contains("'data-game-id'"));
        assert!(script.contains("collect('element-by-id'"));
    }
}
