use std::time::Duration;

use async_trait::async_trait;
use autoweb_core_types::{Outcome, Point, Viewport};
use serde::{Deserialize, Serialize};

use crate::errors::ActionError;
use crate::query::PageQuery;

/// Runs introspection queries against the live document.
///
/// Implementations send `query.script()` to the page and hand back the textual
/// result untouched. Each call sees the current document state.
#[async_trait]
pub trait PageQueryChannel: Send + Sync {
    async fn evaluate(&self, query: &PageQuery) -> Result<String, ActionError>;
}

/// Performs touch input on the render surface.
#[async_trait]
pub trait GestureActuator: Send + Sync {
    async fn tap(&self, at: Point) -> Result<GestureAck, ActionError>;

    async fn swipe(&self, swipe: &Swipe) -> Result<GestureAck, ActionError>;
}

/// Current surface dimensions. Read on demand, never cached by callers.
pub trait SurfaceMetrics: Send + Sync {
    fn viewport(&self) -> Viewport;
}

#[async_trait]
pub trait PageNavigator: Send + Sync {
    async fn load_url(&self, url: &str) -> Result<(), ActionError>;

    async fn reload(&self) -> Result<(), ActionError>;
}

/// A timed press-move-release from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub from: Point,
    pub to: Point,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Swipe {
    pub fn new(from: Point, to: Point, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Finger travel; content scrolls by the negation.
    pub fn delta(&self) -> (f64, f64) {
        (self.to.x - self.from.x, self.to.y - self.from.y)
    }
}

/// Acknowledgement returned by an actuator for a completed gesture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureAck {
    pub detail: String,
}

impl GestureAck {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Maps a `SUCCESS:` / `ERROR:` string from a host actuator.
    pub fn from_tagged(raw: &str) -> Result<Self, ActionError> {
        match Outcome::parse_tagged(raw) {
            Outcome::Success(detail) => Ok(Self::new(detail)),
            Outcome::Failure(reason) => Err(ActionError::Gesture(reason)),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_acks_map_to_results() {
        assert_eq!(
            GestureAck::from_tagged("SUCCESS: Click simulated").unwrap().detail,
            "Click simulated"
        );
        assert_eq!(
            GestureAck::from_tagged("ERROR: surface detached"),
            Err(ActionError::Gesture("surface detached".into()))
        );
    }

    #[test]
    fn swipe_serializes_duration_as_millis() {
        let swipe = Swipe::new(
            Point::new(10.0, 300.0),
            Point::new(10.0, 150.0),
            Duration::from_millis(250),
        );
        let json = serde_json::to_value(swipe).unwrap();
        assert_eq!(json["duration"], serde_json::json!(250));
        assert_eq!(swipe.delta(), (0.0, -150.0));
    }
}
