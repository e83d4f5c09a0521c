mod actions;
mod core;
mod drawing;
mod fade;
mod options;
mod regions;
mod render;

pub use core::{EngineError, Event, Overlay, Session};
pub use fade::{FADE_STEP, FadeTask};
pub use options::OverlayOptions;
pub use regions::{Activation, AppState, CanvasState, CursorState, FadeState};
