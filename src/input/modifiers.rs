//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Used to match keyboard shortcuts against the configured keybindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a modifier press or release. Returns `true` if `key` was a modifier.
    pub fn update(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    /// Releases every modifier (used when the window loses focus).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tracks_modifiers_only() {
        let mut mods = Modifiers::new();
        assert!(mods.update(Key::Ctrl, true));
        assert!(mods.update(Key::Shift, true));
        assert!(!mods.update(Key::Char('z'), true));
        assert!(mods.ctrl && mods.shift && !mods.alt);

        mods.update(Key::Ctrl, false);
        assert!(!mods.ctrl);

        mods.reset();
        assert!(!mods.shift);
    }
}
