//! Mark model, path generation and rendering (Cairo-based).
//!
//! This module defines the core drawing types used for screen annotation:
//! - [`Color`]: RGBA color representation with the palette constants
//! - [`Mark`] / [`CompletedMark`]: an annotation from first touch to commit
//! - [`Outline`]: immutable vector geometry produced by the path generator
//! - [`History`]: committed, fading and undone marks
//! - [`Surfaces`]: the live and committed drawing layers
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod freehand;
pub mod history;
pub mod mark;
pub mod path;
pub mod render;
pub mod surfaces;

// Re-export commonly used types at module level
pub use color::Color;
pub use history::{DecayOutcome, History};
pub use mark::{CompletedMark, Mark, MarkKind, MarkPoint};
pub use path::{Outline, Paint, PathCommand, outline_for};
pub use render::{redraw_committed, redraw_live, write_png};
pub use surfaces::{CanvasSize, DrawError, Surfaces};
