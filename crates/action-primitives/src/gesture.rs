//! Touch sequencing for actuators that synthesize gestures from raw touch events.

use std::time::Duration;

use autoweb_core_types::Point;

use crate::ports::Swipe;

/// Intermediate move events per swipe.
pub const SWIPE_MOVE_STEPS: u32 = 20;

/// Press duration of a tap.
pub const TAP_HOLD: Duration = Duration::from_millis(100);

/// One touch-move sample: where the finger is and when, relative to touch start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub at: Point,
    pub offset: Duration,
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Move samples for `swipe`, excluding the initial press. The last sample is `swipe.to`.
pub fn swipe_path(swipe: &Swipe) -> Vec<TouchSample> {
    let (dx, dy) = swipe.delta();
    (1..=SWIPE_MOVE_STEPS)
        .map(|step| {
            let progress = f64::from(step) / f64::from(SWIPE_MOVE_STEPS);
            let eased = ease_in_out_cubic(progress);
            TouchSample {
                at: Point::new(swipe.from.x + dx * eased, swipe.from.y + dy * eased),
                offset: swipe.duration.mul_f64(progress),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_symmetric_and_bounded() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn path_ends_on_target_at_full_duration() {
        let swipe = Swipe::new(
            Point::new(187.0, 333.0),
            Point::new(187.0, 33.0),
            Duration::from_millis(300),
        );
        let path = swipe_path(&swipe);
        assert_eq!(path.len(), SWIPE_MOVE_STEPS as usize);
        let last = path.last().unwrap();
        assert_eq!(last.at, swipe.to);
        assert_eq!(last.offset, Duration::from_millis(300));
        assert!(path.windows(2).all(|pair| pair[1].at.y <= pair[0].at.y));
    }
}
