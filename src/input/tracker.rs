//! Latest pointer sample and movement delta.

use super::events::PointerKind;
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// One pointer reading as delivered by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub x: f64,
    pub y: f64,
    /// Reported pressure in `[0, 1]`; mice report a constant.
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    #[serde(default, rename = "pointer")]
    pub pointer_kind: PointerKind,
}

fn default_pressure() -> f64 {
    0.5
}

impl InputSample {
    /// A mouse sample at `(x, y)` with the default mouse pressure.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: default_pressure(),
            pointer_kind: PointerKind::Mouse,
        }
    }

    /// A pen sample with explicit pressure.
    pub fn pen(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure,
            pointer_kind: PointerKind::Pen,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for InputSample {
    fn default() -> Self {
        Self::mouse(0.0, 0.0)
    }
}

/// Input Tracker: overwritten on every pointer movement.
///
/// Holds no history beyond the previous position; the delta is what a
/// cursor-following consumer needs between frames.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    sample: InputSample,
    dx: f64,
    dy: f64,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new sample, clamping pressure into `[0, 1]`.
    pub fn record(&mut self, sample: InputSample) {
        self.dx = sample.x - self.sample.x;
        self.dy = sample.y - self.sample.y;
        self.sample = InputSample {
            pressure: if sample.pressure.is_finite() {
                sample.pressure.clamp(0.0, 1.0)
            } else {
                0.0
            },
            ..sample
        };
    }

    /// Latest sample.
    pub fn sample(&self) -> InputSample {
        self.sample
    }

    /// Movement since the previous sample.
    pub fn delta(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }
}
