use std::path::Path;

use super::core::{EngineError, Overlay, Session};
use super::regions::CanvasState;
use crate::backend::Shell;
use crate::draw::{self, DrawError};

impl Session {
    /// Repaints the live layer from the in-progress mark.
    pub(super) fn redraw_live(&self) -> Result<(), DrawError> {
        draw::redraw_live(&self.surfaces, self.current.as_ref())
    }

    /// Repaints the committed layer from history.
    pub(super) fn redraw_committed(&self) -> Result<(), DrawError> {
        draw::redraw_committed(&self.surfaces, &self.history)
    }
}

impl<S: Shell> Overlay<S> {
    /// Repaints both layers. Does nothing before surfaces are bound.
    pub fn redraw_all(&self) -> Result<(), EngineError> {
        if let Some(session) = self.session.as_ref() {
            session.redraw_committed()?;
            session.redraw_live()?;
        }
        Ok(())
    }

    /// Drops the in-progress mark and clears the live layer.
    pub(super) fn discard_current_mark(&mut self) {
        self.canvas = CanvasState::NotDrawing;
        if let Some(session) = self.session.as_mut() {
            if session.current.take().is_some() {
                log::debug!("Discarded in-progress mark");
            }
            if let Err(e) = session.redraw_live() {
                log::warn!("Failed to clear live layer: {}", e);
            }
        }
    }

    /// Writes committed under live as a PNG.
    pub fn write_png(&self, path: &Path) -> Result<(), EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::SurfacesNotReady)?;
        draw::write_png(&session.surfaces, path)?;
        Ok(())
    }
}
