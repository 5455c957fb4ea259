use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate on the render surface, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Visible region of the page as reported by the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Bounding box in viewport coordinates, as returned by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Box of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center rounded the way the page reports it.
    pub fn center(&self) -> Point {
        Point::new(
            js_round(self.left + self.width / 2.0),
            js_round(self.top + self.height / 2.0),
        )
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn intersects(&self, viewport: &Viewport) -> bool {
        !(self.bottom() < 0.0
            || self.top > viewport.height
            || self.right() < 0.0
            || self.left > viewport.width)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

/// Rounds half toward positive infinity, matching `Math.round`.
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Visibility of an element from its box, computed style and the current viewport.
pub fn is_visible(rect: &Rect, visibility: &str, display: &str, viewport: &Viewport) -> bool {
    rect.has_area()
        && !visibility.eq_ignore_ascii_case("hidden")
        && !display.eq_ignore_ascii_case("none")
        && rect.intersects(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Viewport {
        Viewport::new(375.0, 667.0)
    }

    #[test]
    fn center_rounds_like_the_page() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(rect.center(), Point::new(13.0, 13.0));
        assert_eq!(js_round(-2.5), -2.0);
    }

    #[test]
    fn visibility_requires_area_style_and_intersection() {
        let rect = Rect::centered(Point::new(50.0, 50.0), 40.0, 20.0);
        assert!(is_visible(&rect, "visible", "block", &phone()));
        assert!(!is_visible(&rect, "hidden", "block", &phone()));
        assert!(!is_visible(&rect, "visible", "none", &phone()));
        assert!(!is_visible(
            &Rect::new(10.0, 10.0, 0.0, 20.0),
            "visible",
            "block",
            &phone()
        ));
    }

    #[test]
    fn boxes_below_the_fold_do_not_intersect() {
        let below = Rect::centered(Point::new(50.0, 2000.0), 40.0, 40.0);
        assert!(!below.intersects(&phone()));
        let touching = Rect::new(0.0, 667.0, 10.0, 10.0);
        assert!(touching.intersects(&phone()));
    }
}
