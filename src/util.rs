//! Utility functions for colors, geometry, and easing.
//!
//! This module provides:
//! - Color name lookup for the configuration file
//! - Point projection and corner normalization used by the path generator
//! - The ease-out curve applied to fading marks

use crate::draw::{Color, color::*};

// ============================================================================
// Geometry
// ============================================================================

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `self` to `other`, in radians.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Projects a point `distance` units away from `(x, y)` along `angle` (radians).
///
/// # Examples
/// ```
/// use telestrator::util::project_point;
/// let p = project_point(1.0, 2.0, 0.0, 3.0);
/// assert_eq!((p.x, p.y), (4.0, 2.0));
/// ```
pub fn project_point(x: f64, y: f64, angle: f64, distance: f64) -> Point {
    Point::new(x + angle.cos() * distance, y + angle.sin() * distance)
}

/// Normalizes two drag corners into `(min, max)` corners on each axis.
///
/// Dragging may start at any corner; the returned pair always has
/// `min.x <= max.x` and `min.y <= max.y`.
pub fn corner_bounds(a: Point, b: Point) -> (Point, Point) {
    (
        Point::new(a.x.min(b.x), a.y.min(b.y)),
        Point::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Quadratic ease-out, `t * (2 - t)`.
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to palette colors.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "white", "black" (the palette's near-black), "yellow", "orange", "blue",
///   "mid-blue" (the default pen color)
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "white" => Some(WHITE),
        "black" | "near-black" => Some(NEAR_BLACK),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "blue" => Some(BLUE),
        "mid-blue" => Some(MID_BLUE),
        _ => None,
    }
}
