//! Tool settings: color, stroke size, pressure flag and selected tool.

use super::tool::ToolKind;
use crate::draw::{Color, color};

/// Default stroke sizes in keyboard order.
pub const DEFAULT_SIZES: [f64; 3] = [8.0, 16.0, 32.0];

/// Current drawing parameters. Lives for the whole process and only changes
/// through explicit selection events.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub color: Color,
    /// Stroke size in pixels
    pub size: f64,
    pub pressure_enabled: bool,
    pub selected_tool: ToolKind,
    palette: Vec<Color>,
    sizes: Vec<f64>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::new(
            color::MID_BLUE,
            16.0,
            true,
            color::DEFAULT_PALETTE.to_vec(),
            DEFAULT_SIZES.to_vec(),
        )
    }
}

impl ToolSettings {
    pub fn new(
        color: Color,
        size: f64,
        pressure_enabled: bool,
        palette: Vec<Color>,
        sizes: Vec<f64>,
    ) -> Self {
        Self {
            color,
            size,
            pressure_enabled,
            selected_tool: ToolKind::Pencil,
            palette,
            sizes,
        }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Picks the palette entry at `index`. Out-of-range indices change nothing.
    pub fn set_color_from_key(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(color) => {
                self.color = *color;
                true
            }
            None => false,
        }
    }

    /// Picks the size entry at `index`. Out-of-range indices change nothing.
    pub fn set_size_from_key(&mut self, index: usize) -> bool {
        match self.sizes.get(index) {
            Some(size) => {
                self.size = *size;
                true
            }
            None => false,
        }
    }

    pub fn toggle_pressure(&mut self) -> bool {
        self.pressure_enabled = !self.pressure_enabled;
        self.pressure_enabled
    }
}
