//! Overlay state machine: events, engine context and the event dispatcher.

use std::collections::VecDeque;

use log::{debug, info};
use thiserror::Error;

use super::fade::FadeTask;
use super::options::OverlayOptions;
use super::regions::{Activation, AppState, CanvasState, CursorState, FadeState};
use crate::backend::{CursorStyle, Shell};
use crate::draw::{Color, DrawError, History, Mark, Surfaces};
use crate::input::{InputSample, InputTracker, Modifiers, ToolKind, ToolSettings};

/// Number of event names kept in the trace.
const TRACE_CAPACITY: usize = 64;

/// Errors raised while handling an event.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("drawing surfaces are not ready")]
    SurfacesNotReady,

    #[error(transparent)]
    Draw(#[from] DrawError),
}

/// Named events delivered by the host shell.
#[derive(Debug)]
pub enum Event {
    /// Drawing surfaces became available
    Loaded(Surfaces),
    /// Surfaces are going away
    Unloaded,
    /// The container changed size
    Resized,
    Activated,
    Deactivated,
    EnteredControls,
    LeftControls,
    /// Press on the tool controls while hovering them
    ClickedControls,
    StartedDrawing(InputSample),
    MovedCursor(InputSample),
    StoppedDrawing(InputSample),
    SelectedPencil,
    SelectedEraser,
    SelectedRect,
    SelectedEllipse,
    SelectedArrow,
    SelectedColor(Color),
    SelectedSize(f64),
    ChangedColorKey(usize),
    ChangedSizeKey(usize),
    Undo,
    Redo,
    SoftCleared,
    MediumCleared,
    HardCleared,
    ToggledFading,
    ToggledPressure,
    FocusedWindow,
    BlurredWindow,
    /// Global hotkey
    ActivateShortcut,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Loaded(_) => "LOADED",
            Event::Unloaded => "UNLOADED",
            Event::Resized => "RESIZED",
            Event::Activated => "ACTIVATED",
            Event::Deactivated => "DEACTIVATED",
            Event::EnteredControls => "ENTERED_CONTROLS",
            Event::LeftControls => "LEFT_CONTROLS",
            Event::ClickedControls => "CLICKED_CONTROLS",
            Event::StartedDrawing(_) => "STARTED_DRAWING",
            Event::MovedCursor(_) => "MOVED_CURSOR",
            Event::StoppedDrawing(_) => "STOPPED_DRAWING",
            Event::SelectedPencil => "SELECTED_PENCIL",
            Event::SelectedEraser => "SELECTED_ERASER",
            Event::SelectedRect => "SELECTED_RECT",
            Event::SelectedEllipse => "SELECTED_ELLIPSE",
            Event::SelectedArrow => "SELECTED_ARROW",
            Event::SelectedColor(_) => "SELECTED_COLOR",
            Event::SelectedSize(_) => "SELECTED_SIZE",
            Event::ChangedColorKey(_) => "CHANGED_COLOR_KEY",
            Event::ChangedSizeKey(_) => "CHANGED_SIZE_KEY",
            Event::Undo => "UNDO",
            Event::Redo => "REDO",
            Event::SoftCleared => "SOFT_CLEARED",
            Event::MediumCleared => "MEDIUM_CLEARED",
            Event::HardCleared => "HARD_CLEARED",
            Event::ToggledFading => "TOGGLED_FADING",
            Event::ToggledPressure => "TOGGLED_PRESSURE",
            Event::FocusedWindow => "FOCUSED_WINDOW",
            Event::BlurredWindow => "BLURRED_WINDOW",
            Event::ActivateShortcut => "ACTIVATE_SHORTCUT",
        }
    }

    /// Silent events update render state without logging or tracing.
    pub fn is_silent(&self) -> bool {
        matches!(self, Event::MovedCursor(_) | Event::Resized)
    }

    /// Events whose handling paints or resizes the surfaces.
    fn requires_surfaces(&self) -> bool {
        matches!(
            self,
            Event::Resized
                | Event::Activated
                | Event::ActivateShortcut
                | Event::EnteredControls
                | Event::ClickedControls
                | Event::StartedDrawing(_)
                | Event::StoppedDrawing(_)
                | Event::Undo
                | Event::Redo
                | Event::SoftCleared
                | Event::MediumCleared
                | Event::HardCleared
        )
    }
}

/// Engine context for one overlay session: created on `Loaded`, dropped on
/// `Unloaded`.
#[derive(Debug)]
pub struct Session {
    pub(super) surfaces: Surfaces,
    pub(super) history: History,
    /// The in-progress mark, if any
    pub(super) current: Option<Mark>,
}

impl Session {
    fn new(surfaces: Surfaces) -> Self {
        Self {
            surfaces,
            history: History::new(),
            current: None,
        }
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_mark(&self) -> Option<&Mark> {
        self.current.as_ref()
    }
}

/// The interaction state machine.
///
/// Owns the tool settings, the input tracker and the engine context, and
/// runs the activation, tool, canvas, fade and cursor regions. All calls
/// run to completion; the host delivers events one at a time.
pub struct Overlay<S: Shell> {
    pub(super) shell: S,
    pub(super) options: OverlayOptions,
    /// Tool region lives in `settings.selected_tool`
    pub(super) settings: ToolSettings,
    pub(super) tracker: InputTracker,
    pub(super) modifiers: Modifiers,
    pub(super) session: Option<Session>,
    pub(super) activation: Activation,
    pub(super) canvas: CanvasState,
    pub(super) fade: FadeState,
    pub(super) cursor: CursorState,
    pub(super) fading_enabled: bool,
    /// Periodic decay task; alive only in `FadeState::HasMarks`
    pub(super) fade_task: Option<FadeTask>,
    pub(super) next_mark_id: u64,
    trace: VecDeque<&'static str>,
}

impl<S: Shell> Overlay<S> {
    pub fn new(shell: S, options: OverlayOptions) -> Self {
        Self {
            shell,
            settings: options.settings.clone(),
            fading_enabled: options.fading_enabled,
            options,
            tracker: InputTracker::new(),
            modifiers: Modifiers::new(),
            session: None,
            activation: Activation::Inactive,
            canvas: CanvasState::NotDrawing,
            fade: FadeState::NoMarks,
            cursor: CursorState::Visible,
            fade_task: None,
            next_mark_id: 1,
            trace: VecDeque::with_capacity(TRACE_CAPACITY),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn app_state(&self) -> AppState {
        if self.session.is_some() {
            AppState::Ready
        } else {
            AppState::Loading
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn canvas_state(&self) -> CanvasState {
        self.canvas
    }

    pub fn fade_state(&self) -> FadeState {
        self.fade
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor
    }

    /// Whether the system cursor should be shown over the overlay.
    pub fn cursor_visible(&self) -> bool {
        self.activation == Activation::Active && self.cursor == CursorState::Visible
    }

    pub fn fading_enabled(&self) -> bool {
        self.fading_enabled
    }

    pub fn fade_task_alive(&self) -> bool {
        self.fade_task.is_some()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn tool(&self) -> ToolKind {
        self.settings.selected_tool
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn history(&self) -> Option<&History> {
        self.session.as_ref().map(|s| &s.history)
    }

    pub fn current_mark(&self) -> Option<&Mark> {
        self.session.as_ref().and_then(|s| s.current.as_ref())
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// Names of the most recent non-silent events, oldest first.
    pub fn recent_events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.trace.iter().copied()
    }

    pub(super) fn session_mut(&mut self) -> Result<&mut Session, EngineError> {
        self.session.as_mut().ok_or(EngineError::SurfacesNotReady)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Offers `event` to every region.
    ///
    /// # Errors
    /// Returns [`EngineError::SurfacesNotReady`] when the event needs the
    /// drawing surfaces before `Loaded` has bound them.
    pub fn handle(&mut self, event: Event) -> Result<(), EngineError> {
        let name = event.name();
        let silent = event.is_silent();

        if self.session.is_none() && event.requires_surfaces() {
            if !silent {
                debug!("{name} rejected: surfaces not ready");
            }
            return Err(EngineError::SurfacesNotReady);
        }

        match event {
            Event::Loaded(surfaces) => self.on_loaded(surfaces)?,
            Event::Unloaded => self.on_unloaded(),
            Event::Resized => self.on_resized()?,

            Event::Activated | Event::ActivateShortcut => {
                self.set_activation(Activation::Active)?
            }
            Event::Deactivated => self.set_activation(Activation::Inactive)?,
            Event::BlurredWindow => {
                self.modifiers.reset();
                self.set_activation(Activation::Inactive)?;
            }
            Event::FocusedWindow => {}
            Event::EnteredControls => {
                if self.activation == Activation::Inactive {
                    self.set_activation(Activation::Selecting)?;
                }
            }
            Event::LeftControls => {
                if self.activation == Activation::Selecting {
                    self.set_activation(Activation::Inactive)?;
                }
            }
            Event::ClickedControls => {
                if self.activation == Activation::Selecting {
                    self.set_activation(Activation::Active)?;
                }
            }

            Event::StartedDrawing(sample) => self.on_started_drawing(sample)?,
            Event::MovedCursor(sample) => self.on_moved_cursor(sample)?,
            Event::StoppedDrawing(sample) => self.on_stopped_drawing(sample)?,

            Event::SelectedPencil => self.select_tool(ToolKind::Pencil),
            Event::SelectedEraser => self.select_tool(ToolKind::Eraser),
            Event::SelectedRect => self.select_tool(ToolKind::Rect),
            Event::SelectedEllipse => self.select_tool(ToolKind::Ellipse),
            Event::SelectedArrow => self.select_tool(ToolKind::Arrow),
            Event::SelectedColor(color) => self.select_color(color),
            Event::SelectedSize(size) => self.select_size(size),
            Event::ChangedColorKey(index) => self.change_color_key(index),
            Event::ChangedSizeKey(index) => self.change_size_key(index),

            Event::Undo => self.undo()?,
            Event::Redo => self.redo()?,
            Event::SoftCleared => self.clear(ClearKind::Soft)?,
            Event::MediumCleared => self.clear(ClearKind::Medium)?,
            Event::HardCleared => self.clear(ClearKind::Hard)?,

            Event::ToggledFading => self.toggle_fading()?,
            Event::ToggledPressure => self.toggle_pressure(),
        }

        if !silent {
            self.record_event(name);
            debug!(
                "{name}: activation={} tool={} canvas={:?} fade={}",
                self.activation.name(),
                self.settings.selected_tool.name(),
                self.canvas,
                self.fade.name()
            );
        }
        Ok(())
    }

    fn record_event(&mut self, name: &'static str) {
        if self.trace.len() == TRACE_CAPACITY {
            self.trace.pop_front();
        }
        self.trace.push_back(name);
    }

    // ------------------------------------------------------------------
    // App region
    // ------------------------------------------------------------------

    fn on_loaded(&mut self, surfaces: Surfaces) -> Result<(), EngineError> {
        surfaces.clear()?;
        let size = surfaces.size();
        match self.session.as_mut() {
            Some(session) => {
                session.surfaces = surfaces;
                self.redraw_all()?;
                info!("Rebound surfaces at {}x{}", size.width, size.height);
            }
            None => {
                self.session = Some(Session::new(surfaces));
                info!("Surfaces ready at {}x{}", size.width, size.height);
                self.enter_inactive();
            }
        }
        Ok(())
    }

    fn on_unloaded(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.fade_task = None;
        self.fade = FadeState::NoMarks;
        self.canvas = CanvasState::NotDrawing;
        self.activation = Activation::Inactive;
        self.shell.set_pointer_capture(false);
        self.shell.set_cursor(CursorStyle::Default);
        info!("Surfaces released");
    }

    fn on_resized(&mut self) -> Result<(), EngineError> {
        let size = self.shell.container_size();
        let session = self.session_mut()?;
        session.surfaces.resize(size)?;
        self.redraw_all()
    }

    // ------------------------------------------------------------------
    // Activation region
    // ------------------------------------------------------------------

    /// Moves the activation region to `to`, running its entry actions.
    /// Re-entering the current state does nothing.
    pub(super) fn set_activation(&mut self, to: Activation) -> Result<(), EngineError> {
        if self.activation == to {
            return Ok(());
        }
        info!("Activation {} -> {}", self.activation.name(), to.name());
        self.activation = to;
        match to {
            Activation::Inactive => self.enter_inactive(),
            Activation::Selecting => {
                self.shell.set_pointer_capture(true);
                self.shell.set_cursor(CursorStyle::Default);
            }
            Activation::Active => {
                self.shell.set_pointer_capture(true);
                self.shell.set_cursor(self.active_cursor_style());
                let size = self.shell.container_size();
                self.session_mut()?.surfaces.resize(size)?;
                self.redraw_all()?;
            }
        }
        Ok(())
    }

    /// Entry actions for `inactive`: drop any in-progress mark and give the
    /// pointer back to the desktop.
    fn enter_inactive(&mut self) {
        self.activation = Activation::Inactive;
        self.discard_current_mark();
        self.shell.set_pointer_capture(false);
        self.shell.set_cursor(CursorStyle::Default);
    }

    pub(super) fn active_cursor_style(&self) -> CursorStyle {
        match self.cursor {
            CursorState::Visible => CursorStyle::Crosshair,
            CursorState::Hidden => CursorStyle::Hidden,
        }
    }
}

/// Clearing variants, differing only in where they leave the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ClearKind {
    /// Stay in the current tool and activation state
    Soft,
    /// Pencil, selecting
    Medium,
    /// Pencil, inactive
    Hard,
}
