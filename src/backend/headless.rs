//! Headless host shell and TOML event-script replay.
//!
//! Scripts are lists of `[[step]]` tables tagged by `event`:
//!
//! ```toml
//! [[step]]
//! event = "activated"
//!
//! [[step]]
//! event = "started_drawing"
//! x = 10.0
//! y = 20.0
//!
//! [[step]]
//! event = "wait"
//! ms = 500
//!
//! [[step]]
//! event = "key"
//! key = "z"
//! ctrl = true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::{CursorStyle, Shell};
use crate::config::ColorSpec;
use crate::draw::{CanvasSize, Surfaces};
use crate::input::{Event, InputSample, Key, Overlay};

/// A call the engine made on the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCall {
    PointerCapture(bool),
    Cursor(CursorStyle),
}

/// Shell with no window behind it. Records every call for inspection.
#[derive(Debug, Clone)]
pub struct HeadlessShell {
    size: CanvasSize,
    pointer_captured: bool,
    cursor: CursorStyle,
    calls: Vec<ShellCall>,
}

impl HeadlessShell {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            pointer_captured: false,
            cursor: CursorStyle::Default,
            calls: Vec::new(),
        }
    }

    /// Simulates the container being resized by the window system.
    pub fn set_container_size(&mut self, size: CanvasSize) {
        self.size = size;
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn calls(&self) -> &[ShellCall] {
        &self.calls
    }
}

impl Shell for HeadlessShell {
    fn set_pointer_capture(&mut self, capture: bool) {
        self.pointer_captured = capture;
        self.calls.push(ShellCall::PointerCapture(capture));
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
        self.calls.push(ShellCall::Cursor(cursor));
    }

    fn container_size(&self) -> CanvasSize {
        self.size
    }
}

// ============================================================================
// Scripts
// ============================================================================

/// A replayable event script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One script step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Step {
    Unloaded,
    Resized { width: i32, height: i32 },
    Activated,
    Deactivated,
    EnteredControls,
    LeftControls,
    ClickedControls,
    StartedDrawing(InputSample),
    MovedCursor(InputSample),
    StoppedDrawing(InputSample),
    SelectedPencil,
    SelectedEraser,
    SelectedRect,
    SelectedEllipse,
    SelectedArrow,
    SelectedColor { color: ColorSpec },
    SelectedSize { size: f64 },
    ChangedColorKey { index: usize },
    ChangedSizeKey { index: usize },
    Undo,
    Redo,
    SoftCleared,
    MediumCleared,
    HardCleared,
    ToggledFading,
    ToggledPressure,
    FocusedWindow,
    BlurredWindow,
    ActivateShortcut,
    /// Let host time pass so the fade task runs
    Wait { ms: u64 },
    /// Key press with optional modifiers, released afterwards
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Parses a key name as used in scripts: a single character or "Escape".
pub fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Key::Char(c)),
        _ if name.eq_ignore_ascii_case("escape") || name.eq_ignore_ascii_case("esc") => {
            Ok(Key::Escape)
        }
        _ => Err(anyhow!("Unsupported key '{name}'")),
    }
}

/// Binds fresh surfaces at the shell's container size.
pub fn load_surfaces(overlay: &mut Overlay<HeadlessShell>) -> Result<()> {
    let size = overlay.shell().container_size();
    let surfaces = Surfaces::new(size).context("Failed to create drawing surfaces")?;
    overlay.handle(Event::Loaded(surfaces))?;
    Ok(())
}

/// Runs every step of `script` against `overlay` in order.
pub fn replay(script: &Script, overlay: &mut Overlay<HeadlessShell>) -> Result<()> {
    for (index, step) in script.steps.iter().enumerate() {
        run_step(step, overlay).with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
    }
    Ok(())
}

fn run_step(step: &Step, overlay: &mut Overlay<HeadlessShell>) -> Result<()> {
    let event = match step {
        Step::Wait { ms } => {
            overlay.advance(Duration::from_millis(*ms))?;
            return Ok(());
        }
        Step::Key {
            key,
            ctrl,
            shift,
            alt,
        } => {
            press_key(overlay, parse_key(key)?, *ctrl, *shift, *alt)?;
            return Ok(());
        }
        Step::Resized { width, height } => {
            overlay
                .shell_mut()
                .set_container_size(CanvasSize::new(*width, *height));
            Event::Resized
        }
        Step::Unloaded => Event::Unloaded,
        Step::Activated => Event::Activated,
        Step::Deactivated => Event::Deactivated,
        Step::EnteredControls => Event::EnteredControls,
        Step::LeftControls => Event::LeftControls,
        Step::ClickedControls => Event::ClickedControls,
        Step::StartedDrawing(sample) => Event::StartedDrawing(*sample),
        Step::MovedCursor(sample) => Event::MovedCursor(*sample),
        Step::StoppedDrawing(sample) => Event::StoppedDrawing(*sample),
        Step::SelectedPencil => Event::SelectedPencil,
        Step::SelectedEraser => Event::SelectedEraser,
        Step::SelectedRect => Event::SelectedRect,
        Step::SelectedEllipse => Event::SelectedEllipse,
        Step::SelectedArrow => Event::SelectedArrow,
        Step::SelectedColor { color } => Event::SelectedColor(color.to_color()),
        Step::SelectedSize { size } => Event::SelectedSize(*size),
        Step::ChangedColorKey { index } => Event::ChangedColorKey(*index),
        Step::ChangedSizeKey { index } => Event::ChangedSizeKey(*index),
        Step::Undo => Event::Undo,
        Step::Redo => Event::Redo,
        Step::SoftCleared => Event::SoftCleared,
        Step::MediumCleared => Event::MediumCleared,
        Step::HardCleared => Event::HardCleared,
        Step::ToggledFading => Event::ToggledFading,
        Step::ToggledPressure => Event::ToggledPressure,
        Step::FocusedWindow => Event::FocusedWindow,
        Step::BlurredWindow => Event::BlurredWindow,
        Step::ActivateShortcut => Event::ActivateShortcut,
    };
    overlay.handle(event)?;
    Ok(())
}

fn press_key(
    overlay: &mut Overlay<HeadlessShell>,
    key: Key,
    ctrl: bool,
    shift: bool,
    alt: bool,
) -> Result<()> {
    let modifiers: Vec<Key> = [(ctrl, Key::Ctrl), (shift, Key::Shift), (alt, Key::Alt)]
        .into_iter()
        .filter_map(|(held, key)| held.then_some(key))
        .collect();

    for modifier in &modifiers {
        overlay.handle_key(*modifier)?;
    }
    let handled = overlay.handle_key(key);
    overlay.handle_key_release(key);
    for modifier in &modifiers {
        overlay.handle_key_release(*modifier);
    }
    if !handled? {
        log::debug!("Key {:?} is not bound", key);
    }
    Ok(())
}

/// One-line description of the overlay state.
pub fn summary<S: Shell>(overlay: &Overlay<S>) -> String {
    let (marks, fading, redo) = overlay
        .history()
        .map(|h| (h.marks().len(), h.fading().len(), h.redo_stack().len()))
        .unwrap_or_default();
    format!(
        "activation={} tool={} fade={} marks={} fading={} redo={}",
        overlay.activation().name(),
        overlay.tool().name(),
        overlay.fade_state().name(),
        marks,
        fading,
        redo
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::state::OverlayOptions;
    use crate::input::state::Activation;

    fn overlay() -> Overlay<HeadlessShell> {
        let mut overlay = Overlay::new(
            HeadlessShell::new(CanvasSize::new(200, 100)),
            OverlayOptions::default(),
        );
        load_surfaces(&mut overlay).unwrap();
        overlay
    }

    #[test]
    fn parses_tagged_steps() {
        let script = Script::parse(
            r#"
[[step]]
event = "activated"

[[step]]
event = "started_drawing"
x = 10.0
y = 20.5
pointer = "pen"
pressure = 0.8

[[step]]
event = "wait"
ms = 250

[[step]]
event = "selected_color"
color = [255, 0, 0]

[[step]]
event = "key"
key = "z"
ctrl = true
"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 5);
        match &script.steps[1] {
            Step::StartedDrawing(sample) => {
                assert_eq!(sample.x, 10.0);
                assert_eq!(sample.y, 20.5);
                assert_eq!(sample.pressure, 0.8);
                assert_eq!(sample.pointer_kind, crate::input::PointerKind::Pen);
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert!(matches!(script.steps[2], Step::Wait { ms: 250 }));
        assert!(matches!(
            script.steps[4],
            Step::Key {
                ctrl: true,
                shift: false,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(Script::parse("[[step]]\nevent = \"teleported\"\n").is_err());
    }

    #[test]
    fn parse_key_accepts_chars_and_escape() {
        assert_eq!(parse_key("z").unwrap(), Key::Char('z'));
        assert_eq!(parse_key("Escape").unwrap(), Key::Escape);
        assert!(parse_key("F13").is_err());
    }

    #[test]
    fn replay_draws_and_undoes_with_keys() {
        let script = Script::parse(
            r#"
[[step]]
event = "activated"

[[step]]
event = "key"
key = "r"

[[step]]
event = "started_drawing"
x = 10.0
y = 10.0

[[step]]
event = "moved_cursor"
x = 80.0
y = 60.0

[[step]]
event = "stopped_drawing"
x = 80.0
y = 60.0

[[step]]
event = "key"
key = "z"
ctrl = true
"#,
        )
        .unwrap();

        let mut overlay = overlay();
        replay(&script, &mut overlay).unwrap();

        assert_eq!(overlay.activation(), Activation::Active);
        assert_eq!(overlay.tool().name(), "rect");
        let history = overlay.history().unwrap();
        assert!(history.is_empty());
        assert_eq!(history.redo_stack().len(), 1);
        assert!(!overlay.modifiers().ctrl);
        assert_eq!(
            summary(&overlay),
            "activation=active tool=rect fade=no-marks marks=0 fading=0 redo=1"
        );
    }

    #[test]
    fn resize_step_resizes_surfaces() {
        let script = Script::parse(
            "[[step]]\nevent = \"resized\"\nwidth = 320\nheight = 240\n",
        )
        .unwrap();
        let mut overlay = overlay();
        replay(&script, &mut overlay).unwrap();
        let size = overlay.session().unwrap().surfaces().size();
        assert_eq!(size, CanvasSize::new(320, 240));
    }

    #[test]
    fn failing_step_reports_its_position() {
        let script = Script::parse("[[step]]\nevent = \"undo\"\n").unwrap();
        let mut overlay = Overlay::new(
            HeadlessShell::new(CanvasSize::new(10, 10)),
            OverlayOptions::default(),
        );
        let err = replay(&script, &mut overlay).unwrap_err();
        assert!(format!("{err:#}").contains("Step 1"));
        assert!(format!("{err:#}").contains("surfaces are not ready"));
    }
}
