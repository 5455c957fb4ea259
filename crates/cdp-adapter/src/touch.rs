//! Raw touch sequences for taps and swipes.

use std::time::Duration;

use action_primitives::{swipe_path, Swipe, TAP_HOLD};
use autoweb_core_types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// One `Input.dispatchTouchEvent`. `delay` is waited before dispatching;
/// `at` is `None` for the release, which carries no touch points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchStep {
    pub phase: TouchPhase,
    pub at: Option<Point>,
    pub delay: Duration,
}

impl TouchStep {
    fn new(phase: TouchPhase, at: Option<Point>, delay: Duration) -> Self {
        Self { phase, at, delay }
    }
}

pub fn tap_sequence(at: Point) -> Vec<TouchStep> {
    vec![
        TouchStep::new(TouchPhase::Start, Some(at), Duration::ZERO),
        TouchStep::new(TouchPhase::End, None, TAP_HOLD),
    ]
}

/// Press at `swipe.from`, eased moves spread across the duration, release.
pub fn swipe_sequence(swipe: &Swipe) -> Vec<TouchStep> {
    let samples = swipe_path(swipe);
    let mut steps = Vec::with_capacity(samples.len() + 2);
    steps.push(TouchStep::new(TouchPhase::Start, Some(swipe.from), Duration::ZERO));
    let mut elapsed = Duration::ZERO;
    for sample in samples {
        steps.push(TouchStep::new(
            TouchPhase::Move,
            Some(sample.at),
            sample.offset.saturating_sub(elapsed),
        ));
        elapsed = sample.offset;
    }
    steps.push(TouchStep::new(TouchPhase::End, None, Duration::ZERO));
    steps
}
