//! The two drawing layers and their size.

use thiserror::Error;

/// Errors raised while creating or painting the drawing layers.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to open output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Measured size of the overlay container in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    fn validate(self) -> Result<Self, DrawError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(DrawError::InvalidSurfaceSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Live and committed ARGB32 layers.
///
/// The live layer holds only the in-progress mark; the committed layer holds
/// every finished mark that is still visible. The host composites committed
/// under live.
#[derive(Debug)]
pub struct Surfaces {
    live: cairo::ImageSurface,
    committed: cairo::ImageSurface,
    size: CanvasSize,
}

impl Surfaces {
    /// Creates both layers, fully transparent.
    pub fn new(size: CanvasSize) -> Result<Self, DrawError> {
        let size = size.validate()?;
        Ok(Self {
            live: create_layer(size)?,
            committed: create_layer(size)?,
            size,
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn live(&self) -> &cairo::ImageSurface {
        &self.live
    }

    pub fn committed(&self) -> &cairo::ImageSurface {
        &self.committed
    }

    /// Reallocates both layers at `size`. Their content is dropped; callers
    /// repaint from mark data afterwards.
    pub fn resize(&mut self, size: CanvasSize) -> Result<(), DrawError> {
        let size = size.validate()?;
        if size == self.size {
            return Ok(());
        }
        self.live = create_layer(size)?;
        self.committed = create_layer(size)?;
        self.size = size;
        Ok(())
    }

    /// Clears both layers to transparent.
    pub fn clear(&self) -> Result<(), DrawError> {
        clear_layer(&self.live)?;
        clear_layer(&self.committed)?;
        Ok(())
    }
}

fn create_layer(size: CanvasSize) -> Result<cairo::ImageSurface, DrawError> {
    Ok(cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        size.width,
        size.height,
    )?)
}

/// Paints `surface` fully transparent.
pub fn clear_layer(surface: &cairo::ImageSurface) -> Result<(), DrawError> {
    let ctx = cairo::Context::new(surface)?;
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    Ok(())
}
