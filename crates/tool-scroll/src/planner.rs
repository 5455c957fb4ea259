//! Scroll planning. Pure geometry; no page access.

use action_primitives::Swipe;
use autoweb_core_types::{Point, Viewport};
use serde::{Deserialize, Serialize};

use crate::policy::ScrollPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Exploratory scan direction, named after where the content moves into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploreDirection {
    Down,
    Up,
    Right,
    Left,
}

impl ExploreDirection {
    /// Directions cycle down, up, right, left.
    pub fn for_step(step: u32) -> Self {
        match step % 4 {
            0 => ExploreDirection::Down,
            1 => ExploreDirection::Up,
            2 => ExploreDirection::Right,
            _ => ExploreDirection::Left,
        }
    }
}

/// A single-axis scroll. `distance` is how far the content scrolls: positive
/// toward the end of the document. The swipe moves the finger the other way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPlan {
    pub axis: Axis,
    pub distance: f64,
    pub swipe: Swipe,
}

impl ScrollPlan {
    fn from_center(viewport: &Viewport, axis: Axis, distance: f64, duration: std::time::Duration) -> Self {
        let from = viewport.center();
        let to = match axis {
            Axis::Horizontal => from.offset(-distance, 0.0),
            Axis::Vertical => from.offset(0.0, -distance),
        };
        Self {
            axis,
            distance,
            swipe: Swipe::new(from, to, duration),
        }
    }
}

pub fn is_near_viewport(point: Point, viewport: &Viewport, policy: &ScrollPolicy) -> bool {
    let within = |value: f64, extent: f64| {
        value >= -policy.near_before_factor * extent && value <= policy.near_after_factor * extent
    };
    within(point.x, viewport.width) && within(point.y, viewport.height)
}

fn precise_component(delta: f64, policy: &ScrollPolicy) -> f64 {
    if delta.abs() < policy.precise_dead_zone {
        0.0
    } else if delta.abs() > policy.precise_max_distance {
        policy.precise_max_distance.copysign(delta)
    } else {
        delta
    }
}

/// Short single-axis nudge toward `target`, or `None` when it sits inside the dead zone.
pub fn plan_precise(target: Point, viewport: &Viewport, policy: &ScrollPolicy) -> Option<ScrollPlan> {
    let center = viewport.center();
    let dx = precise_component(target.x - center.x, policy);
    let dy = precise_component(target.y - center.y, policy);

    let (axis, distance) = if dx.abs() > dy.abs() {
        (Axis::Horizontal, dx)
    } else if dy != 0.0 {
        (Axis::Vertical, dy)
    } else {
        return None;
    };
    Some(ScrollPlan::from_center(
        viewport,
        axis,
        distance,
        policy.timings.precise(),
    ))
}

/// One step toward a located target along its dominant axis.
pub fn plan_step(target: Point, viewport: &Viewport, policy: &ScrollPolicy) -> ScrollPlan {
    let center = viewport.center();
    let dx = target.x - center.x;
    let dy = target.y - center.y;
    let (axis, delta) = if dy.abs() > dx.abs() {
        (Axis::Vertical, dy)
    } else {
        (Axis::Horizontal, dx)
    };
    let magnitude = delta
        .abs()
        .clamp(policy.min_scroll_distance, policy.max_scroll_distance);
    let distance = if delta > 0.0 { magnitude } else { -magnitude };
    ScrollPlan::from_center(viewport, axis, distance, policy.timings.step())
}

/// Fixed-distance scan used while the target cannot be located.
pub fn plan_exploratory(
    direction: ExploreDirection,
    viewport: &Viewport,
    policy: &ScrollPolicy,
) -> ScrollPlan {
    let (axis, distance) = match direction {
        ExploreDirection::Down => (Axis::Vertical, policy.exploratory_vertical_distance),
        ExploreDirection::Up => (Axis::Vertical, -policy.exploratory_vertical_distance),
        ExploreDirection::Right => (Axis::Horizontal, policy.exploratory_horizontal_distance),
        ExploreDirection::Left => (Axis::Horizontal, -policy.exploratory_horizontal_distance),
    };
    ScrollPlan::from_center(viewport, axis, distance, policy.timings.exploratory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn phone() -> Viewport {
        Viewport::new(375.0, 667.0)
    }

    #[test]
    fn near_window_is_asymmetric() {
        let policy = ScrollPolicy::default();
        assert!(is_near_viewport(Point::new(50.0, 1600.0), &phone(), &policy));
        assert!(!is_near_viewport(Point::new(50.0, 2000.0), &phone(), &policy));
        assert!(is_near_viewport(Point::new(-560.0, 10.0), &phone(), &policy));
        assert!(!is_near_viewport(Point::new(-570.0, 10.0), &phone(), &policy));
    }

    #[test]
    fn precise_clamps_and_picks_one_axis() {
        let plan = plan_precise(Point::new(187.5, 900.0), &phone(), &ScrollPolicy::default()).unwrap();
        assert_eq!(plan.axis, Axis::Vertical);
        assert_eq!(plan.distance, 100.0);
        assert_eq!(plan.swipe.to, Point::new(187.5, 233.5));
        assert_eq!(plan.swipe.duration, Duration::from_millis(200));

        let sideways = plan_precise(Point::new(300.0, 360.0), &phone(), &ScrollPolicy::default()).unwrap();
        assert_eq!(sideways.axis, Axis::Horizontal);
        assert_eq!(sideways.distance, 100.0);
    }

    #[test]
    fn precise_dead_zone_suppresses_jitter() {
        assert!(plan_precise(Point::new(200.0, 370.0), &phone(), &ScrollPolicy::default()).is_none());
        let plan = plan_precise(Point::new(200.0, 400.0), &phone(), &ScrollPolicy::default()).unwrap();
        assert_eq!(plan.axis, Axis::Vertical);
        assert_eq!(plan.distance, 66.5);
    }

    #[test]
    fn step_distance_is_clamped_with_sign() {
        let policy = ScrollPolicy::default();
        let far = plan_step(Point::new(50.0, 2000.0), &phone(), &policy);
        assert_eq!(far.axis, Axis::Vertical);
        assert_eq!(far.distance, 300.0);
        assert_eq!(far.swipe.delta(), (0.0, -300.0));

        let above = plan_step(Point::new(187.5, 300.0), &phone(), &policy);
        assert_eq!(above.distance, -100.0);
        assert_eq!(above.swipe.duration, Duration::from_millis(300));
    }

    #[test]
    fn exploratory_cycle() {
        let policy = ScrollPolicy::default();
        let directions: Vec<_> = (0..6).map(ExploreDirection::for_step).collect();
        assert_eq!(
            directions,
            vec![
                ExploreDirection::Down,
                ExploreDirection::Up,
                ExploreDirection::Right,
                ExploreDirection::Left,
                ExploreDirection::Down,
                ExploreDirection::Up,
            ]
        );
        let right = plan_exploratory(ExploreDirection::Right, &phone(), &policy);
        assert_eq!(right.swipe.delta(), (-120.0, 0.0));
        let up = plan_exploratory(ExploreDirection::Up, &phone(), &policy);
        assert_eq!(up.swipe.delta(), (0.0, 150.0));
    }
}
