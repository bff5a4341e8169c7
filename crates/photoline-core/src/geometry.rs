//! Section-local geometry and the bounds clamp applied to every drag.
//!
//! All coordinates are in CSS pixels relative to the section's own origin,
//! with `y` growing downwards.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Horizontal allowance an element may hang past the section's left edge.
/// The right edge is pulled in by the same amount.
pub const DEFAULT_EDGE_MARGIN: f64 = 16.0;
pub const MAX_EDGE_MARGIN: f64 = 64.0;

/// A point or a delta between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Measured size of an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at `origin` spanning `size`.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Clamp tuning shared by every element of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampConfig {
    pub edge_margin: f64,
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self {
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl ClampConfig {
    /// This config if its margin is finite and within
    /// `0..=MAX_EDGE_MARGIN`, the default otherwise.
    pub fn validated(self) -> Self {
        if self.edge_margin.is_finite() && (0.0..=MAX_EDGE_MARGIN).contains(&self.edge_margin) {
            self
        } else {
            tracing::warn!(edge_margin = self.edge_margin, "edge margin out of range, using default");
            Self::default()
        }
    }
}

/// One tick's measurement of an element and the section that contains it.
///
/// Taken fresh from the render tree on every pointer event; layout may shift
/// between gestures so this is never kept around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub element: Size,
    pub section: Rect,
}

impl Layout {
    pub const fn new(element: Size, section: Rect) -> Self {
        Self { element, section }
    }
}

/// Constrain `proposed` so an element of `element` size stays inside `section`.
///
/// Vertically the box must sit between the section's top and bottom edges.
/// Horizontally it may start up to `margin` left of the content edge, and its
/// right edge stops `margin` short of the section's right edge. When the
/// element does not fit along an axis the minimum (left-most / top-most)
/// position wins. Non-finite coordinates collapse to that minimum as well.
pub fn clamp_position(proposed: Point, element: Size, section: Rect, margin: f64) -> Point {
    let x = clamp_axis(
        proposed.x,
        section.left - margin,
        section.right - margin - element.width,
    );
    let y = clamp_axis(proposed.y, section.top, section.bottom - element.height);
    Point::new(x, y)
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || max < min {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_config_validation() {
        for margin in [0.0, 8.0, MAX_EDGE_MARGIN] {
            let config = ClampConfig { edge_margin: margin };
            assert_eq!(config.validated(), config);
        }
        for margin in [-1.0, 64.5, 1e6, f64::NAN, f64::INFINITY] {
            let config = ClampConfig { edge_margin: margin };
            assert_eq!(config.validated(), ClampConfig::default());
        }
    }

    fn section() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 300.0)
    }

    #[test]
    fn test_inside_position_untouched() {
        let p = clamp_position(Point::new(150.0, 120.0), Size::new(200.0, 100.0), section(), 16.0);
        assert_eq!(p, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_top_overflow_clamped_to_section_top() {
        let p = clamp_position(Point::new(50.0, -40.0), Size::new(200.0, 100.0), section(), 16.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_bottom_overflow_clamped() {
        let p = clamp_position(Point::new(50.0, 290.0), Size::new(200.0, 100.0), section(), 16.0);
        assert_eq!(p.y, 200.0);
    }

    #[test]
    fn test_left_margin_allowance() {
        let p = clamp_position(Point::new(-100.0, 10.0), Size::new(200.0, 100.0), section(), 16.0);
        assert_eq!(p.x, -16.0);
    }

    #[test]
    fn test_right_edge_stops_short_by_margin() {
        let p = clamp_position(Point::new(900.0, 10.0), Size::new(200.0, 100.0), section(), 16.0);
        assert_eq!(p.x, 800.0 - 16.0 - 200.0);
    }

    #[test]
    fn test_too_wide_element_pinned_left() {
        let p = clamp_position(Point::new(300.0, 10.0), Size::new(1000.0, 100.0), section(), 16.0);
        assert_eq!(p.x, -16.0);
    }

    #[test]
    fn test_too_tall_element_pinned_top() {
        let p = clamp_position(Point::new(10.0, 50.0), Size::new(100.0, 500.0), section(), 16.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_non_finite_proposal_collapses_to_minimum() {
        let p = clamp_position(
            Point::new(f64::NAN, f64::INFINITY),
            Size::new(100.0, 100.0),
            section(),
            16.0,
        );
        assert_eq!(p, Point::new(-16.0, 0.0));
    }

    #[test]
    fn test_vertical_containment_over_grid() {
        let sections = [
            Rect::new(0.0, 0.0, 800.0, 300.0),
            Rect::new(24.0, 12.0, 640.0, 420.0),
            Rect::new(-50.0, -20.0, 200.0, 90.0),
        ];
        let sizes = [Size::new(80.0, 60.0), Size::new(200.0, 70.0), Size::new(10.0, 10.0)];
        for section in sections {
            for size in sizes {
                let mut y = -1000.0;
                while y <= 1000.0 {
                    let mut x = -1000.0;
                    while x <= 1000.0 {
                        let p = clamp_position(Point::new(x, y), size, section, 16.0);
                        assert!(p.y >= section.top, "{p:?} above {section:?}");
                        assert!(p.y + size.height <= section.bottom, "{p:?} below {section:?}");
                        x += 37.5;
                    }
                    y += 41.0;
                }
            }
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let size = Size::new(200.0, 100.0);
        for (x, y) in [(-500.0, -500.0), (100.0, 100.0), (2000.0, 80.0), (300.0, 9000.0)] {
            let once = clamp_position(Point::new(x, y), size, section(), 16.0);
            let twice = clamp_position(once, size, section(), 16.0);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(100.0, 100.0);
        let b = Point::new(150.0, 120.0);
        assert_eq!(b - a, Point::new(50.0, 20.0));
        assert_eq!(a + (b - a), b);
    }
}
