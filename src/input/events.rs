//! Generic input event types for cross-backend compatibility.

use serde::{Deserialize, Serialize};

/// Generic key representation for cross-backend compatibility.
///
/// Host shells map their native key codes to these generic key values
/// for unified keyboard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Shift modifier
    Shift,
    /// Ctrl modifier (Command on macOS hosts)
    Ctrl,
    /// Alt modifier (Option on macOS hosts)
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Key name as written in keybinding strings.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            _ => None,
        }
    }
}

/// Device that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Whether the device reports real pressure values.
    pub fn reports_pressure(self) -> bool {
        !matches!(self, PointerKind::Mouse)
    }
}
