//! In-memory page for driving the targeting engine without a browser.
//!
//! [`FixturePage`] implements every port. It answers the introspection queries
//! from a list of [`FixtureElement`]s laid out in document coordinates, scrolls
//! when swiped, and records every gesture it receives. Failures can be injected
//! per gesture kind or for all queries.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use autoweb_core_types::{truncate_title, PageScrollSnapshot, Point, Rect, Viewport};
use parking_lot::Mutex;
use serde::Serialize;

use crate::errors::ActionError;
use crate::ports::{
    GestureAck, GestureActuator, PageNavigator, PageQueryChannel, SurfaceMetrics, Swipe,
};
use crate::query::{LocateStrategy, PageQuery};
use crate::types::{
    ElementsResponse, LinkResponse, LoadStatus, LocateResponse, RawNode, StrategyMatches,
    UrlsResponse,
};

/// One element of a fixture document.
#[derive(Clone, Debug)]
pub struct FixtureElement {
    pub tag: String,
    pub id: String,
    pub classes: Vec<String>,
    pub title: String,
    pub attributes: BTreeMap<String, String>,
    /// Box in document coordinates.
    pub bounds: Rect,
    pub visibility: String,
    pub display: String,
    pub href: Option<String>,
    /// The element is absent until this many swipes have been performed.
    pub reveal_after_swipes: u32,
}

impl FixtureElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: String::new(),
            classes: Vec::new(),
            title: String::new(),
            attributes: BTreeMap::new(),
            bounds: Rect::centered(Point::new(20.0, 20.0), 40.0, 40.0),
            visibility: "visible".into(),
            display: "block".into(),
            href: None,
            reveal_after_swipes: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Adds one or more space-separated classes.
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Centers the element on `(x, y)` in document coordinates.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.bounds = Rect::centered(Point::new(x, y), self.bounds.width, self.bounds.height);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        let center = Point::new(
            self.bounds.left + self.bounds.width / 2.0,
            self.bounds.top + self.bounds.height / 2.0,
        );
        self.bounds = Rect::centered(center, width, height);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = "hidden".into();
        self
    }

    pub fn display_none(mut self) -> Self {
        self.display = "none".into();
        self
    }

    pub fn lazy(mut self, after_swipes: u32) -> Self {
        self.reveal_after_swipes = after_swipes;
        self
    }

    fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => (!self.id.is_empty()).then(|| self.id.clone()),
            "class" => (!self.classes.is_empty()).then(|| self.class_name()),
            "title" => (!self.title.is_empty()).then(|| self.title.clone()),
            "href" => self.href.clone(),
            other => self.attributes.get(other).cloned(),
        }
    }
}

/// Gesture received by the fixture, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureRecord {
    Tap(Point),
    Swipe(Swipe),
}

#[derive(Debug)]
struct FixtureState {
    viewport: Viewport,
    document_size: Option<(f64, f64)>,
    scroll: Point,
    elements: Vec<FixtureElement>,
    base_url: Option<String>,
    extra_urls: Vec<String>,
    gestures: Vec<GestureRecord>,
    swipe_count: u32,
    queries: HashMap<&'static str, u32>,
    tap_failures: u32,
    swipe_failures: u32,
    fail_queries: bool,
    navigations: Vec<String>,
    reloads: u32,
}

/// Scriptable stand-in for a rendered page.
#[derive(Debug)]
pub struct FixturePage {
    state: Mutex<FixtureState>,
}

impl FixturePage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Mutex::new(FixtureState {
                viewport,
                document_size: None,
                scroll: Point::default(),
                elements: Vec::new(),
                base_url: None,
                extra_urls: Vec::new(),
                gestures: Vec::new(),
                swipe_count: 0,
                queries: HashMap::new(),
                tap_failures: 0,
                swipe_failures: 0,
                fail_queries: false,
                navigations: Vec::new(),
                reloads: 0,
            }),
        }
    }

    pub fn with_element(self, element: FixtureElement) -> Self {
        self.add_element(element);
        self
    }

    /// Fixes the scrollable document size instead of deriving it from the elements.
    pub fn with_document_size(self, width: f64, height: f64) -> Self {
        self.state.lock().document_size = Some((width, height));
        self
    }

    /// Base URL and raw URL strings reported in addition to element hrefs.
    pub fn with_urls<I, S>(self, base_url: &str, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut state = self.state.lock();
            state.base_url = Some(base_url.to_string());
            state.extra_urls.extend(urls.into_iter().map(Into::into));
        }
        self
    }

    pub fn add_element(&self, element: FixtureElement) {
        self.state.lock().elements.push(element);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.lock().viewport = viewport;
    }

    pub fn fail_next_taps(&self, count: u32) {
        self.state.lock().tap_failures = count;
    }

    pub fn fail_next_swipes(&self, count: u32) {
        self.state.lock().swipe_failures = count;
    }

    /// Makes every query answer `ERROR: ...` until switched off.
    pub fn fail_queries(&self, enabled: bool) {
        self.state.lock().fail_queries = enabled;
    }

    pub fn gestures(&self) -> Vec<GestureRecord> {
        self.state.lock().gestures.clone()
    }

    /// Every tap attempt, including injected failures.
    pub fn taps(&self) -> Vec<Point> {
        self.gestures()
            .into_iter()
            .filter_map(|gesture| match gesture {
                GestureRecord::Tap(at) => Some(at),
                GestureRecord::Swipe(_) => None,
            })
            .collect()
    }

    /// Every swipe attempt, including injected failures.
    pub fn swipes(&self) -> Vec<Swipe> {
        self.gestures()
            .into_iter()
            .filter_map(|gesture| match gesture {
                GestureRecord::Swipe(swipe) => Some(swipe),
                GestureRecord::Tap(_) => None,
            })
            .collect()
    }

    /// Number of queries of the given [`PageQuery::name`] answered so far.
    pub fn query_count(&self, name: &str) -> u32 {
        self.state.lock().queries.get(name).copied().unwrap_or(0)
    }

    pub fn scroll_offset(&self) -> Point {
        self.state.lock().scroll
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }

    pub fn reloads(&self) -> u32 {
        self.state.lock().reloads
    }

    fn answer(&self, query: &PageQuery) -> String {
        let mut state = self.state.lock();
        *state.queries.entry(query.name()).or_insert(0) += 1;
        if state.fail_queries {
            return "ERROR: page unavailable".to_string();
        }
        match query {
            PageQuery::Locate { identifier } => encode(&state.locate(identifier)),
            PageQuery::ScrollInfo => encode(&state.scroll_info()),
            PageQuery::LoadStatus => encode(&state.load_status()),
            PageQuery::ListElements => encode(&state.list_elements()),
            PageQuery::ListUrls => encode(&state.list_urls()),
            PageQuery::FindLink { url } => encode(&state.find_link(url)),
        }
    }
}

fn encode<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| format!("ERROR: {err}"))
}

fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

impl FixtureState {
    fn present(&self) -> impl Iterator<Item = (usize, &FixtureElement)> {
        let swipes = self.swipe_count;
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, element)| element.reveal_after_swipes <= swipes)
    }

    fn document_extent(&self) -> (f64, f64) {
        if let Some(size) = self.document_size {
            return size;
        }
        self.elements.iter().fold(
            (self.viewport.width, self.viewport.height),
            |(width, height), element| {
                (
                    width.max(element.bounds.right()),
                    height.max(element.bounds.bottom()),
                )
            },
        )
    }

    fn max_scroll(&self) -> Point {
        let (width, height) = self.document_extent();
        Point::new(
            (width - self.viewport.width).max(0.0),
            (height - self.viewport.height).max(0.0),
        )
    }

    fn node(&self, index: usize, element: &FixtureElement) -> RawNode {
        RawNode {
            key: index as u64 + 1,
            tag: element.tag.clone(),
            id: element.id.clone(),
            class_name: Some(element.class_name()),
            title: element.title.clone(),
            rect: element.bounds.translate(-self.scroll.x, -self.scroll.y),
            visibility: element.visibility.clone(),
            display: element.display.clone(),
            href: element
                .href
                .clone()
                .or_else(|| element.attributes.get("data-href").cloned()),
        }
    }

    fn select(&self, selector: &str) -> Result<Vec<RawNode>, String> {
        let compound = Compound::parse(selector)?;
        Ok(self
            .present()
            .filter(|(_, element)| compound.matches(element))
            .map(|(index, element)| self.node(index, element))
            .collect())
    }

    fn locate(&self, identifier: &str) -> LocateResponse {
        let strategies = LocateStrategy::plan(identifier)
            .into_iter()
            .map(|strategy| {
                let found = match strategy {
                    LocateStrategy::ElementById => Ok(self
                        .present()
                        .find(|(_, element)| element.id == identifier)
                        .map(|(index, element)| self.node(index, element))
                        .into_iter()
                        .collect()),
                    LocateStrategy::Selector => self.select(identifier),
                    LocateStrategy::ClassName => {
                        let wanted: Vec<&str> = identifier[1..].split_whitespace().collect();
                        Ok(self
                            .present()
                            .filter(|(_, element)| {
                                !wanted.is_empty()
                                    && wanted
                                        .iter()
                                        .all(|name| element.classes.iter().any(|c| c == name))
                            })
                            .map(|(index, element)| self.node(index, element))
                            .collect())
                    }
                    other => self.select(&other.attribute_selector(identifier).unwrap_or_default()),
                };
                match found {
                    Ok(matches) => StrategyMatches {
                        strategy,
                        matches,
                        error: None,
                    },
                    Err(error) => StrategyMatches {
                        strategy,
                        matches: Vec::new(),
                        error: Some(error),
                    },
                }
            })
            .collect();
        LocateResponse {
            viewport: self.viewport,
            strategies,
        }
    }

    fn scroll_info(&self) -> PageScrollSnapshot {
        let (width, height) = self.document_extent();
        PageScrollSnapshot {
            scroll_top: self.scroll.y,
            scroll_left: self.scroll.x,
            scroll_width: width,
            scroll_height: height,
            client_width: self.viewport.width,
            client_height: self.viewport.height,
            viewport_width: self.viewport.width,
            viewport_height: self.viewport.height,
        }
    }

    fn load_status(&self) -> LoadStatus {
        let total = self.present().count() as u32;
        LoadStatus {
            document_ready: true,
            loading_images: 0,
            lazy_elements: self.elements.len() as u32 - total,
            total_elements: total,
            timestamp: 0.0,
        }
    }

    fn list_elements(&self) -> ElementsResponse {
        ElementsResponse {
            viewport: self.viewport,
            nodes: self
                .present()
                .filter(|(_, element)| !element.id.is_empty() || !element.classes.is_empty())
                .map(|(index, element)| self.node(index, element))
                .collect(),
        }
    }

    fn list_urls(&self) -> UrlsResponse {
        let mut urls = self.extra_urls.clone();
        urls.extend(self.present().filter_map(|(_, element)| element.href.clone()));
        UrlsResponse {
            base_url: self.base_url.clone(),
            urls,
        }
    }

    fn find_link(&self, url: &str) -> LinkResponse {
        let wanted = strip_fragment(url);
        let link = self.present().find(|(_, element)| {
            element
                .href
                .as_deref()
                .map_or(false, |href| strip_fragment(href) == wanted)
        });
        match link {
            Some((_, element)) => LinkResponse {
                found: true,
                identifier: Some(if element.id.is_empty() {
                    let href = element.href.clone().unwrap_or_default();
                    format!(
                        "{}[href=\"{}\"]",
                        element.tag,
                        href.replace('\\', "\\\\").replace('"', "\\\"")
                    )
                } else {
                    format!("#{}", element.id)
                }),
                title: truncate_title(&element.title),
            },
            None => LinkResponse::default(),
        }
    }

    fn apply_swipe(&mut self, swipe: &Swipe) {
        self.swipe_count += 1;
        let max = self.max_scroll();
        self.scroll = Point::new(
            (self.scroll.x + swipe.from.x - swipe.to.x).clamp(0.0, max.x),
            (self.scroll.y + swipe.from.y - swipe.to.y).clamp(0.0, max.y),
        );
    }
}

/// The selector subset the fixture understands: an optional tag followed by
/// `#id`, `.class`, `[attr]`, `[attr="v"]` and `[attr*="v"]` parts.
#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeTest>,
}

#[derive(Debug)]
struct AttributeTest {
    name: String,
    op: AttributeOp,
    value: String,
}

#[derive(Debug, PartialEq)]
enum AttributeOp {
    Exists,
    Equals,
    Contains,
}

impl Compound {
    fn parse(raw: &str) -> Result<Self, String> {
        let invalid = || format!("'{raw}' is not a valid selector");
        let chars: Vec<char> = raw.trim().chars().collect();
        if chars.is_empty() {
            return Err(invalid());
        }

        let mut compound = Compound::default();
        let mut pos = 0;
        let tag = read_ident(&chars, &mut pos);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        } else if chars[0] == '*' {
            pos += 1;
        }

        while pos < chars.len() {
            match chars[pos] {
                '#' | '.' => {
                    let marker = chars[pos];
                    pos += 1;
                    let name = read_ident(&chars, &mut pos);
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    if marker == '#' {
                        compound.ids.push(name);
                    } else {
                        compound.classes.push(name);
                    }
                }
                '[' => {
                    pos += 1;
                    let name = read_ident(&chars, &mut pos);
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    let op = match (chars.get(pos), chars.get(pos + 1)) {
                        (Some(']'), _) => AttributeOp::Exists,
                        (Some('='), _) => {
                            pos += 1;
                            AttributeOp::Equals
                        }
                        (Some('*'), Some('=')) => {
                            pos += 2;
                            AttributeOp::Contains
                        }
                        _ => return Err(invalid()),
                    };
                    let value = if op == AttributeOp::Exists {
                        String::new()
                    } else {
                        read_quoted(&chars, &mut pos).ok_or_else(invalid)?
                    };
                    if chars.get(pos) != Some(&']') {
                        return Err(invalid());
                    }
                    pos += 1;
                    compound.attributes.push(AttributeTest { name, op, value });
                }
                _ => return Err(invalid()),
            }
        }
        Ok(compound)
    }

    fn matches(&self, element: &FixtureElement) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != element.tag {
                return false;
            }
        }
        self.ids.iter().all(|id| *id == element.id)
            && self
                .classes
                .iter()
                .all(|class| element.classes.iter().any(|c| c == class))
            && self.attributes.iter().all(|test| {
                let actual = element.attribute(&test.name);
                match test.op {
                    AttributeOp::Exists => actual.is_some(),
                    AttributeOp::Equals => actual.as_deref() == Some(test.value.as_str()),
                    AttributeOp::Contains => {
                        !test.value.is_empty()
                            && actual.map_or(false, |value| value.contains(&test.value))
                    }
                }
            })
    }
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len()
        && (chars[*pos].is_alphanumeric() || chars[*pos] == '-' || chars[*pos] == '_')
    {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn read_quoted(chars: &[char], pos: &mut usize) -> Option<String> {
    if chars.get(*pos) != Some(&'"') {
        return None;
    }
    *pos += 1;
    let mut value = String::new();
    while let Some(&c) = chars.get(*pos) {
        *pos += 1;
        match c {
            '\\' => {
                value.push(*chars.get(*pos)?);
                *pos += 1;
            }
            '"' => return Some(value),
            other => value.push(other),
        }
    }
    None
}

#[async_trait]
impl PageQueryChannel for FixturePage {
    async fn evaluate(&self, query: &PageQuery) -> Result<String, ActionError> {
        Ok(self.answer(query))
    }
}

#[async_trait]
impl GestureActuator for FixturePage {
    async fn tap(&self, at: Point) -> Result<GestureAck, ActionError> {
        let mut state = self.state.lock();
        state.gestures.push(GestureRecord::Tap(at));
        if state.tap_failures > 0 {
            state.tap_failures -= 1;
            return Err(ActionError::Gesture("injected tap failure".into()));
        }
        Ok(GestureAck::new(format!("tap {at}")))
    }

    async fn swipe(&self, swipe: &Swipe) -> Result<GestureAck, ActionError> {
        let mut state = self.state.lock();
        state.gestures.push(GestureRecord::Swipe(*swipe));
        if state.swipe_failures > 0 {
            state.swipe_failures -= 1;
            return Err(ActionError::Gesture("injected swipe failure".into()));
        }
        state.apply_swipe(swipe);
        Ok(GestureAck::new(format!("swipe {} -> {}", swipe.from, swipe.to)))
    }
}

impl SurfaceMetrics for FixturePage {
    fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }
}

#[async_trait]
impl PageNavigator for FixturePage {
    async fn load_url(&self, url: &str) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        state.navigations.push(url.to_string());
        state.scroll = Point::default();
        Ok(())
    }

    async fn reload(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        state.reloads += 1;
        state.scroll = Point::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::decode;
    use std::time::Duration;

    fn page() -> FixturePage {
        FixturePage::new(Viewport::new(375.0, 667.0))
            .with_element(FixtureElement::new("button").with_id("buy-btn").at(50.0, 50.0))
            .with_element(
                FixtureElement::new("div")
                    .with_class("card promo")
                    .with_attr("data-id", "promo")
                    .at(100.0, 1200.0),
            )
    }

    #[tokio::test]
    async fn locate_reports_every_applicable_strategy() {
        let page = page();
        let raw = page.evaluate(&PageQuery::locate("#buy-btn")).await.unwrap();
        let response: LocateResponse = decode(&raw).unwrap();
        let selector = &response.strategies[0];
        assert_eq!(selector.strategy, LocateStrategy::Selector);
        assert_eq!(selector.matches.len(), 1);
        assert_eq!(selector.matches[0].rect.center(), Point::new(50.0, 50.0));
        assert!(response.strategies[1..].iter().all(|s| s.matches.is_empty()));
    }

    #[tokio::test]
    async fn invalid_selectors_are_reported_per_strategy() {
        let page = page();
        let raw = page.evaluate(&PageQuery::locate("promo")).await.unwrap();
        let response: LocateResponse = decode(&raw).unwrap();
        let by_data_id = response
            .strategies
            .iter()
            .find(|s| s.strategy == LocateStrategy::DataId)
            .unwrap();
        assert_eq!(by_data_id.matches.len(), 1);

        let raw = page.evaluate(&PageQuery::locate("a > b")).await.unwrap();
        let response: LocateResponse = decode(&raw).unwrap();
        assert!(response.strategies.iter().any(|s| s.error.is_some()));
    }

    #[tokio::test]
    async fn swipes_scroll_content_within_document() {
        let page = page();
        let swipe = Swipe::new(
            Point::new(187.5, 333.5),
            Point::new(187.5, 33.5),
            Duration::from_millis(300),
        );
        page.swipe(&swipe).await.unwrap();
        assert_eq!(page.scroll_offset(), Point::new(0.0, 300.0));

        let back = Swipe::new(swipe.to, Point::new(187.5, 1333.5), Duration::from_millis(300));
        page.swipe(&back).await.unwrap();
        assert_eq!(page.scroll_offset(), Point::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn injected_tap_failures_are_recorded() {
        let page = page();
        page.fail_next_taps(1);
        assert!(page.tap(Point::new(1.0, 1.0)).await.is_err());
        assert!(page.tap(Point::new(1.0, 1.0)).await.is_ok());
        assert_eq!(page.taps().len(), 2);
    }

    #[test]
    fn selector_subset_parses_compounds() {
        let compound = Compound::parse("div.card[data-id=\"promo\"]").unwrap();
        assert_eq!(compound.tag.as_deref(), Some("div"));
        assert_eq!(compound.classes, vec!["card".to_string()]);
        assert_eq!(compound.attributes.len(), 1);
        assert!(Compound::parse("[id*=\"x\"").is_err());
        assert!(Compound::parse("").is_err());
    }
}
