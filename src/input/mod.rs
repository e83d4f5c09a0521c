//! Input handling and the interaction state machine.
//!
//! This module turns host events (pointer, keyboard, focus, resize) into
//! drawing actions. It holds the tool settings, tracks the latest pointer
//! sample, and runs the overlay's state regions (activation, tool, canvas,
//! fade, cursor).

pub mod events;
pub mod modifiers;
pub mod settings;
pub mod state;
pub mod tool;
pub mod tracker;

// Re-export commonly used types at module level
pub use events::{Key, PointerKind};
pub use modifiers::Modifiers;
pub use settings::ToolSettings;
pub use state::{EngineError, Event, Overlay};
pub use tool::ToolKind;
pub use tracker::{InputSample, InputTracker};
