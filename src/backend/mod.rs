//! Host shell integration.
//!
//! The overlay engine never talks to a window system directly. Everything it
//! needs from its host goes through [`Shell`]; the host in turn feeds
//! [`Event`](crate::input::Event)s into the engine.

pub mod headless;

pub use headless::{HeadlessShell, ShellCall};

use crate::draw::CanvasSize;

/// Cursor shown over the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// The desktop's normal cursor
    #[default]
    Default,
    /// Drawing cursor for mouse input
    Crosshair,
    /// No cursor; a pen tip marks the position
    Hidden,
}

/// Collaborator interface implemented by the host window.
pub trait Shell {
    /// Capture the pointer (`true`) or let it pass through to windows below.
    fn set_pointer_capture(&mut self, capture: bool);

    /// Change the cursor shown over the overlay.
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Current measured size of the overlay container.
    fn container_size(&self) -> CanvasSize;
}
