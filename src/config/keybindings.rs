//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that maps keyboard
//! shortcuts to overlay actions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Activation
    Deactivate,

    // History
    Undo,
    Redo,
    SoftClear,
    MediumClear,
    HardClear,

    // Setting toggles
    ToggleFading,
    TogglePressure,

    // Tool selection
    SelectPencil,
    SelectEraser,
    SelectRect,
    SelectEllipse,
    SelectArrow,

    // Palette and size lookups by zero-based index
    ColorKey(usize),
    SizeKey(usize),
}

/// A single keybinding: a key with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// Single-character keys are stored lowercase so "Ctrl+Z" and "ctrl+z"
    /// are the same binding.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => ctrl = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into empty parts after the modifiers; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            "+".to_string()
        } else if key.chars().count() == 1 {
            key.to_lowercase()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// deactivate = ["Escape"]
/// undo = ["Ctrl+Z"]
/// select_rect = ["R", "Shift+R"]
/// color_keys = [["1"], ["2"], ["3"]]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_deactivate")]
    pub deactivate: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_soft_clear")]
    pub soft_clear: Vec<String>,

    #[serde(default = "default_medium_clear")]
    pub medium_clear: Vec<String>,

    #[serde(default = "default_hard_clear")]
    pub hard_clear: Vec<String>,

    #[serde(default = "default_toggle_fading")]
    pub toggle_fading: Vec<String>,

    #[serde(default = "default_toggle_pressure")]
    pub toggle_pressure: Vec<String>,

    #[serde(default = "default_select_pencil")]
    pub select_pencil: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_rect")]
    pub select_rect: Vec<String>,

    #[serde(default = "default_select_ellipse")]
    pub select_ellipse: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    /// Bindings per palette index; entry `i` selects palette color `i`
    #[serde(default = "default_color_keys")]
    pub color_keys: Vec<Vec<String>>,

    /// Bindings per size index; entry `i` selects size `i`
    #[serde(default = "default_size_keys")]
    pub size_keys: Vec<Vec<String>>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            deactivate: default_deactivate(),
            undo: default_undo(),
            redo: default_redo(),
            soft_clear: default_soft_clear(),
            medium_clear: default_medium_clear(),
            hard_clear: default_hard_clear(),
            toggle_fading: default_toggle_fading(),
            toggle_pressure: default_toggle_pressure(),
            select_pencil: default_select_pencil(),
            select_eraser: default_select_eraser(),
            select_rect: default_select_rect(),
            select_ellipse: default_select_ellipse(),
            select_arrow: default_select_arrow(),
            color_keys: default_color_keys(),
            size_keys: default_size_keys(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_all = |bindings: &[String], action: Action| -> Result<(), String> {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
            Ok(())
        };

        insert_all(&self.deactivate, Action::Deactivate)?;
        insert_all(&self.undo, Action::Undo)?;
        insert_all(&self.redo, Action::Redo)?;
        insert_all(&self.soft_clear, Action::SoftClear)?;
        insert_all(&self.medium_clear, Action::MediumClear)?;
        insert_all(&self.hard_clear, Action::HardClear)?;
        insert_all(&self.toggle_fading, Action::ToggleFading)?;
        insert_all(&self.toggle_pressure, Action::TogglePressure)?;
        insert_all(&self.select_pencil, Action::SelectPencil)?;
        insert_all(&self.select_eraser, Action::SelectEraser)?;
        insert_all(&self.select_rect, Action::SelectRect)?;
        insert_all(&self.select_ellipse, Action::SelectEllipse)?;
        insert_all(&self.select_arrow, Action::SelectArrow)?;

        for (index, bindings) in self.color_keys.iter().enumerate() {
            insert_all(bindings, Action::ColorKey(index))?;
        }
        for (index, bindings) in self.size_keys.iter().enumerate() {
            insert_all(bindings, Action::SizeKey(index))?;
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn keys(bindings: &[&str]) -> Vec<String> {
    bindings.iter().map(|s| s.to_string()).collect()
}

fn default_deactivate() -> Vec<String> {
    keys(&["Escape"])
}

fn default_undo() -> Vec<String> {
    keys(&["Ctrl+Z"])
}

fn default_redo() -> Vec<String> {
    keys(&["Ctrl+Shift+Z"])
}

fn default_soft_clear() -> Vec<String> {
    keys(&["Ctrl+E"])
}

fn default_medium_clear() -> Vec<String> {
    keys(&["Ctrl+Alt+E"])
}

fn default_hard_clear() -> Vec<String> {
    keys(&["Ctrl+Shift+E"])
}

fn default_toggle_fading() -> Vec<String> {
    keys(&["Ctrl+F"])
}

fn default_toggle_pressure() -> Vec<String> {
    keys(&["Shift+P", "Shift+D"])
}

fn default_select_pencil() -> Vec<String> {
    keys(&["P", "D"])
}

fn default_select_eraser() -> Vec<String> {
    keys(&["X"])
}

fn default_select_rect() -> Vec<String> {
    keys(&["R"])
}

fn default_select_ellipse() -> Vec<String> {
    keys(&["E"])
}

fn default_select_arrow() -> Vec<String> {
    keys(&["A"])
}

fn default_color_keys() -> Vec<Vec<String>> {
    (1..=7).map(|n| vec![n.to_string()]).collect()
}

fn default_size_keys() -> Vec<Vec<String>> {
    (1..=7).map(|n| vec![format!("Ctrl+{n}")]).collect()
}
