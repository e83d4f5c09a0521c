use log::{debug, info};

use super::core::{ClearKind, EngineError, Event, Overlay};
use super::regions::{Activation, CanvasState, FadeState};
use crate::backend::Shell;
use crate::config::Action;
use crate::draw::Color;
use crate::input::{Key, ToolKind};

impl<S: Shell> Overlay<S> {
    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub(super) fn undo(&mut self) -> Result<(), EngineError> {
        let session = self.session_mut()?;
        if !session.history.undo() {
            debug!("Nothing to undo");
            return Ok(());
        }
        session.redraw_committed()?;
        session.redraw_live()?;
        self.refresh_fade_region()
    }

    pub(super) fn redo(&mut self) -> Result<(), EngineError> {
        let session = self.session_mut()?;
        if !session.history.redo() {
            debug!("Nothing to redo");
            return Ok(());
        }
        session.redraw_committed()?;
        session.redraw_live()?;
        self.refresh_fade_region()
    }

    /// Wipes history, redo and the in-progress mark, then lands in the
    /// tool and activation state for `kind`.
    pub(super) fn clear(&mut self, kind: ClearKind) -> Result<(), EngineError> {
        let session = self.session_mut()?;
        session.history.clear();
        session.current = None;
        session.surfaces.clear()?;
        self.canvas = CanvasState::NotDrawing;
        self.set_fade_state(FadeState::NoMarks)?;

        match kind {
            ClearKind::Soft => {}
            ClearKind::Medium => {
                self.select_tool(ToolKind::Pencil);
                self.set_activation(Activation::Selecting)?;
            }
            ClearKind::Hard => {
                self.select_tool(ToolKind::Pencil);
                self.set_activation(Activation::Inactive)?;
            }
        }
        info!("Cleared all marks ({kind:?})");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tool settings
    // ------------------------------------------------------------------

    /// Selects a tool. Ignored while a mark is in progress.
    pub(super) fn select_tool(&mut self, tool: ToolKind) {
        if self.canvas == CanvasState::Drawing {
            debug!("Ignoring {} selection while drawing", tool.name());
            return;
        }
        self.settings.selected_tool = tool;
    }

    /// Picking a color while erasing switches back to the pencil.
    pub(super) fn select_color(&mut self, color: Color) {
        self.settings.color = color;
        if self.settings.selected_tool == ToolKind::Eraser {
            self.select_tool(ToolKind::Pencil);
        }
    }

    pub(super) fn select_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.settings.size = size;
        } else {
            debug!("Ignoring invalid size {size}");
        }
    }

    pub(super) fn change_color_key(&mut self, index: usize) {
        if !self.settings.set_color_from_key(index) {
            debug!("No palette color at index {index}");
        }
    }

    pub(super) fn change_size_key(&mut self, index: usize) {
        if !self.settings.set_size_from_key(index) {
            debug!("No size at index {index}");
        }
    }

    pub(super) fn toggle_pressure(&mut self) {
        let enabled = self.settings.toggle_pressure();
        info!(
            "Pressure {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Processes a key press through the keybinding map.
    ///
    /// Returns `Ok(true)` when the key triggered an action.
    pub fn handle_key(&mut self, key: Key) -> Result<bool, EngineError> {
        if self.modifiers.update(key, true) {
            return Ok(false);
        }

        let Some(key_str) = key.binding_name() else {
            return Ok(false);
        };
        let Some(action) = self.find_action(&key_str) else {
            return Ok(false);
        };

        debug!("Key {key_str} -> {action:?}");
        self.handle(action_event(action))?;
        Ok(true)
    }

    /// Processes a key release.
    pub fn handle_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Looks up the action bound to `key_str` under the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.options
            .action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }
}

/// Event raised by a bound action.
fn action_event(action: Action) -> Event {
    match action {
        Action::Deactivate => Event::Deactivated,
        Action::Undo => Event::Undo,
        Action::Redo => Event::Redo,
        Action::SoftClear => Event::SoftCleared,
        Action::MediumClear => Event::MediumCleared,
        Action::HardClear => Event::HardCleared,
        Action::ToggleFading => Event::ToggledFading,
        Action::TogglePressure => Event::ToggledPressure,
        Action::SelectPencil => Event::SelectedPencil,
        Action::SelectEraser => Event::SelectedEraser,
        Action::SelectRect => Event::SelectedRect,
        Action::SelectEllipse => Event::SelectedEllipse,
        Action::SelectArrow => Event::SelectedArrow,
        Action::ColorKey(index) => Event::ChangedColorKey(index),
        Action::SizeKey(index) => Event::ChangedSizeKey(index),
    }
}
