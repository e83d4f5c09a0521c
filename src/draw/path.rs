//! Path generation: turns a mark's points into an immutable vector outline.
//!
//! Every generator is a pure function of the mark, so an outline can be
//! computed once when a mark is committed and reused for every redraw.

use super::freehand;
use super::mark::{Mark, MarkKind};
use crate::util::{self, Point};
use std::f64::consts::PI;

/// Longest arrow head leg before size scaling, in pixels.
pub const ARROW_LEG_MAX: f64 = 48.0;

/// Reference stroke size the arrow leg length is expressed against.
pub const ARROW_SIZE_REFERENCE: f64 = 16.0;

/// Angle between the shaft and each head leg, in radians.
pub const ARROW_LEG_ANGLE: f64 = PI * 1.2;

/// A single path-building instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// A full 0..2π ellipse sweep as its own closed subpath.
    Ellipse { center: Point, rx: f64, ry: f64 },
    ClosePath,
}

/// How an outline is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Closed silhouette, filled
    Fill,
    /// Centerline, stroked with the mark's size
    Stroke,
}

/// Renderable vector outline of a mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub commands: Vec<PathCommand>,
    pub paint: Paint,
}

impl Outline {
    pub fn new(paint: Paint) -> Self {
        Self {
            commands: Vec::new(),
            paint,
        }
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }

    /// All explicit vertices (move/line targets) in path order.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Number of subpaths started by `MoveTo` or `Ellipse`.
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCommand::MoveTo(_) | PathCommand::Ellipse { .. }))
            .count()
    }
}

/// Generates the outline for `mark` using the algorithm for its kind.
pub fn outline_for(mark: &Mark) -> Outline {
    match mark.kind {
        MarkKind::Freehand => freehand::outline(mark),
        MarkKind::Rect => {
            let (a, b) = mark.anchors();
            rect_outline(a, b)
        }
        MarkKind::Ellipse => {
            let (a, b) = mark.anchors();
            ellipse_outline(a, b)
        }
        MarkKind::Arrow => {
            let (a, b) = mark.anchors();
            arrow_outline(a, b, mark.size)
        }
    }
}

/// Axis-aligned rectangle between two drag corners.
pub fn rect_outline(a: Point, b: Point) -> Outline {
    let (min, max) = util::corner_bounds(a, b);
    let mut outline = Outline::new(Paint::Stroke);
    outline.move_to(min);
    outline.line_to(Point::new(max.x, min.y));
    outline.line_to(max);
    outline.line_to(Point::new(min.x, max.y));
    outline.close();
    outline
}

/// Ellipse inscribed in the box between two drag corners.
pub fn ellipse_outline(a: Point, b: Point) -> Outline {
    let (min, max) = util::corner_bounds(a, b);
    let w = max.x - min.x;
    let h = max.y - min.y;
    let mut outline = Outline::new(Paint::Stroke);
    outline.commands.push(PathCommand::Ellipse {
        center: Point::new(min.x + w / 2.0, min.y + h / 2.0),
        rx: w / 2.0,
        ry: h / 2.0,
    });
    outline
}

/// Head leg length for an arrow of the given shaft length and stroke size.
pub fn arrow_leg_length(distance: f64, size: f64) -> f64 {
    (distance / 2.0).min(ARROW_LEG_MAX) * size / ARROW_SIZE_REFERENCE
}

/// Shaft from `tail` to `tip` plus two head legs, as three disjoint segments.
pub fn arrow_outline(tail: Point, tip: Point, size: f64) -> Outline {
    let angle = tail.angle_to(tip);
    let leg = arrow_leg_length(tail.distance(tip), size);
    let left = util::project_point(tip.x, tip.y, angle + ARROW_LEG_ANGLE, leg);
    let right = util::project_point(tip.x, tip.y, angle - ARROW_LEG_ANGLE, leg);

    let mut outline = Outline::new(Paint::Stroke);
    outline.move_to(tail);
    outline.line_to(tip);
    outline.move_to(tip);
    outline.line_to(left);
    outline.move_to(tip);
    outline.line_to(right);
    outline
}
