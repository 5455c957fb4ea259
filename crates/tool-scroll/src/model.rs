use autoweb_core_types::{ElementDescriptor, ElementSnapshot, Outcome, PageScrollSnapshot};
use serde::{Deserialize, Serialize};

/// What to bring into view: a snapshot already in hand, or a descriptor to locate first.
#[derive(Clone, Debug)]
pub enum RevealTarget {
    Snapshot(ElementSnapshot),
    Descriptor(ElementDescriptor),
}

impl From<ElementSnapshot> for RevealTarget {
    fn from(snapshot: ElementSnapshot) -> Self {
        RevealTarget::Snapshot(snapshot)
    }
}

impl From<ElementDescriptor> for RevealTarget {
    fn from(descriptor: ElementDescriptor) -> Self {
        RevealTarget::Descriptor(descriptor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPath {
    AlreadyVisible,
    /// Close to the viewport but inside the dead zone.
    NoScroll,
    Precise,
    Stepped,
}

/// Successful reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealReport {
    pub path: RevealPath,
    /// Scroll gestures issued.
    pub swipes: u32,
    /// Iterations of the stepped search (0 outside it).
    pub steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<PageScrollSnapshot>,
    pub detail: String,
}

impl RevealReport {
    pub(crate) fn new(path: RevealPath, swipes: u32, detail: impl Into<String>) -> Self {
        Self {
            path,
            swipes,
            steps: 0,
            baseline: None,
            detail: detail.into(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::success(self.detail.clone())
    }
}
