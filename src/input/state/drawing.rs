//! Canvas region: the mark lifecycle from draw-start to commit.

use log::debug;

use super::core::{EngineError, Overlay};
use super::regions::{Activation, CanvasState, CursorState};
use crate::backend::Shell;
use crate::draw::Mark;
use crate::input::InputSample;

impl<S: Shell> Overlay<S> {
    /// Records a pointer sample and updates the cursor region.
    fn record_sample(&mut self, sample: InputSample) {
        self.tracker.record(sample);

        let cursor = if sample.pointer_kind.reports_pressure() {
            CursorState::Hidden
        } else {
            CursorState::Visible
        };
        if cursor != self.cursor {
            self.cursor = cursor;
            if self.activation == Activation::Active {
                self.shell.set_cursor(self.active_cursor_style());
            }
        }
    }

    pub(super) fn on_started_drawing(&mut self, sample: InputSample) -> Result<(), EngineError> {
        self.record_sample(sample);
        match self.activation {
            Activation::Inactive => {
                debug!("Ignoring draw start while inactive");
                Ok(())
            }
            // Drawing must not be blocked by hovering the controls
            Activation::Selecting => self.set_activation(Activation::Inactive),
            Activation::Active => self.begin_drawing(),
        }
    }

    /// Enters `drawing`: abandons the redo branch and starts a mark for the
    /// selected tool.
    fn begin_drawing(&mut self) -> Result<(), EngineError> {
        if self.canvas == CanvasState::Drawing {
            debug!("Ignoring draw start while a mark is in progress");
            return Ok(());
        }

        let mark = Mark::begin(
            self.settings.selected_tool,
            self.tracker.sample(),
            &self.settings,
        );
        let session = self.session_mut()?;
        session.history.clear_redo();
        session.current = Some(mark);
        session.redraw_live()?;
        self.canvas = CanvasState::Drawing;
        Ok(())
    }

    /// Silent: appends the sample to the in-progress mark and repaints the
    /// live layer.
    pub(super) fn on_moved_cursor(&mut self, sample: InputSample) -> Result<(), EngineError> {
        self.record_sample(sample);
        if self.canvas != CanvasState::Drawing {
            return Ok(());
        }

        let sample = self.tracker.sample();
        let session = self.session_mut()?;
        let changed = session
            .current
            .as_mut()
            .is_some_and(|mark| mark.add_point(sample));
        if changed {
            session.redraw_live()?;
        }
        Ok(())
    }

    /// Commits the in-progress mark to history and hands it to the fade
    /// region.
    pub(super) fn on_stopped_drawing(&mut self, sample: InputSample) -> Result<(), EngineError> {
        self.record_sample(sample);
        if self.canvas != CanvasState::Drawing {
            debug!("Ignoring draw stop with no mark in progress");
            return Ok(());
        }
        self.canvas = CanvasState::NotDrawing;

        let sample = self.tracker.sample();
        let id = self.next_mark_id;
        let hold = self.options.fade_delay;
        let session = self.session_mut()?;
        let Some(mut mark) = session.current.take() else {
            return Ok(());
        };

        let moved = mark
            .points
            .last()
            .is_none_or(|p| p.x != sample.x || p.y != sample.y);
        if moved {
            mark.add_point(sample);
        }

        debug!(
            "Committing {:?} mark #{} with {} points",
            mark.kind,
            id,
            mark.points.len()
        );
        session.history.commit(mark.complete(id, hold));
        session.redraw_committed()?;
        session.redraw_live()?;
        self.next_mark_id += 1;

        self.enter_has_marks()
    }
}
