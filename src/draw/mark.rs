//! Mark model: an annotation from first touch to completion.

use std::time::Duration;

use super::color::Color;
use super::path::{self, Outline};
use crate::input::{InputSample, PointerKind, ToolKind, ToolSettings};
use crate::util::Point;

/// Geometry family of a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Polyline traced by the pointer, rendered as a filled silhouette
    Freehand,
    /// Axis-aligned rectangle between two anchors
    Rect,
    /// Ellipse inscribed in the box between two anchors
    Ellipse,
    /// Shaft from the first anchor to the second with a two-legged head
    Arrow,
}

impl MarkKind {
    /// Shape kinds keep exactly two anchors instead of a trace.
    pub fn is_bounded(self) -> bool {
        !matches!(self, MarkKind::Freehand)
    }
}

/// One recorded sample of a mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkPoint {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl MarkPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<InputSample> for MarkPoint {
    fn from(sample: InputSample) -> Self {
        Self {
            x: sample.x,
            y: sample.y,
            pressure: sample.pressure,
        }
    }
}

/// The in-progress mark. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub kind: MarkKind,
    pub size: f64,
    pub color: Color,
    pub pressure_enabled: bool,
    pub pointer_kind: PointerKind,
    pub eraser: bool,
    pub points: Vec<MarkPoint>,
}

impl Mark {
    /// Starts a mark for `tool` at the current pointer sample.
    ///
    /// Freehand marks start with a single trace point; shape marks start with
    /// a single anchor awaiting the second corner.
    pub fn begin(tool: ToolKind, sample: InputSample, settings: &ToolSettings) -> Self {
        Self {
            kind: tool.mark_kind(),
            size: settings.size,
            color: settings.color,
            pressure_enabled: settings.pressure_enabled,
            pointer_kind: sample.pointer_kind,
            eraser: tool.is_eraser(),
            points: vec![MarkPoint::from(sample)],
        }
    }

    /// Adds a pointer sample to the mark.
    ///
    /// Freehand marks append; shape marks overwrite their second anchor.
    /// Samples from a different pointer device than the one that started the
    /// mark are dropped. Returns whether the mark changed.
    pub fn add_point(&mut self, sample: InputSample) -> bool {
        if sample.pointer_kind != self.pointer_kind {
            log::trace!(
                "dropping {:?} sample during {:?} stroke",
                sample.pointer_kind,
                self.pointer_kind
            );
            return false;
        }

        let point = MarkPoint::from(sample);
        if self.kind.is_bounded() {
            if self.points.len() < 2 {
                self.points.push(point);
            } else {
                self.points[1] = point;
            }
        } else {
            self.points.push(point);
        }
        true
    }

    /// First and second anchors of a shape mark. A mark that never moved
    /// uses its first point for both.
    pub fn anchors(&self) -> (Point, Point) {
        let first = self
            .points
            .first()
            .map(MarkPoint::position)
            .unwrap_or_default();
        let second = self.points.get(1).map(MarkPoint::position).unwrap_or(first);
        (first, second)
    }

    /// Finalizes the mark, caching its outline once.
    pub fn complete(self, id: u64, fade_delay: Duration) -> CompletedMark {
        let outline = path::outline_for(&self);
        CompletedMark {
            id,
            mark: self,
            outline,
            strength: 1.0,
            hold: fade_delay,
        }
    }
}

/// A committed mark with its cached outline and fade state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMark {
    /// Commit sequence number, unique within a session
    pub id: u64,
    pub mark: Mark,
    /// Outline computed at commit time; never recomputed
    pub outline: Outline,
    /// Fade opacity: 1 = fully visible, <= 0 = removed
    pub strength: f64,
    /// Time left before decay starts
    pub hold: Duration,
}

impl CompletedMark {
    pub fn is_eraser(&self) -> bool {
        self.mark.eraser
    }
}
