//! State identifiers for each region of the overlay state machine.
//!
//! Regions run side by side: every event is offered to each region and a
//! region that has no reaction simply ignores it.

/// Top-level application region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for drawing surfaces
    #[default]
    Loading,
    /// Surfaces bound, engine context alive
    Ready,
}

/// Whether the overlay captures the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Pointer passes through to the windows below
    #[default]
    Inactive,
    /// Pointer hovers the tool controls
    Selecting,
    /// Overlay captures the pointer and draws
    Active,
}

impl Activation {
    pub fn name(self) -> &'static str {
        match self {
            Activation::Inactive => "inactive",
            Activation::Selecting => "selecting",
            Activation::Active => "active",
        }
    }
}

/// Whether a mark is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasState {
    #[default]
    NotDrawing,
    Drawing,
}

/// Fade region. Only `HasMarks` runs the decay task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeState {
    /// History is empty
    #[default]
    NoMarks,
    /// History may hold marks but fading is switched off
    NotFading,
    /// Marks exist and are decaying
    HasMarks,
}

impl FadeState {
    pub fn name(self) -> &'static str {
        match self {
            FadeState::NoMarks => "no-marks",
            FadeState::NotFading => "not-fading",
            FadeState::HasMarks => "has-marks",
        }
    }
}

/// Cursor region, driven by the device of the latest pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Mouse input; the cursor is shown
    #[default]
    Visible,
    /// Pen or touch input; the tip is the cursor
    Hidden,
}
