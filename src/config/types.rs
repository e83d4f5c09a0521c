//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool settings the overlay starts with. Users change these
/// at runtime through the palette and size keys.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - either a named color (white, black, yellow, orange, blue, mid-blue)
    /// or an RGB array like `[66, 166, 246]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke size in pixels (valid range: 1.0 - 128.0)
    #[serde(default = "default_size")]
    pub default_size: f64,

    /// Widen freehand strokes with pen pressure (or simulated pressure for mice)
    #[serde(default = "default_pressure_enabled")]
    pub pressure_enabled: bool,

    /// Colors selected by the color keys, in key order
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,

    /// Stroke sizes selected by the size keys, in key order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<f64>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_size(),
            pressure_enabled: default_pressure_enabled(),
            palette: default_palette(),
            sizes: default_sizes(),
        }
    }
}

/// Fade-out settings for committed marks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FadeConfig {
    /// Start with fading enabled
    #[serde(default = "default_fade_enabled")]
    pub enabled: bool,

    /// Time a finished mark stays fully visible before fading (valid range: 0 - 10000 ms)
    #[serde(default = "default_fade_delay_ms")]
    pub delay_ms: u64,

    /// Time a mark takes to fade from full strength to gone (valid range: 16 - 60000 ms)
    #[serde(default = "default_fade_duration_ms")]
    pub duration_ms: u64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            enabled: default_fade_enabled(),
            delay_ms: default_fade_delay_ms(),
            duration_ms: default_fade_duration_ms(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("mid-blue".to_string())
}

fn default_size() -> f64 {
    16.0
}

fn default_pressure_enabled() -> bool {
    true
}

pub(super) fn default_palette() -> Vec<ColorSpec> {
    ["white", "black", "yellow", "orange", "blue"]
        .into_iter()
        .map(|name| ColorSpec::Name(name.to_string()))
        .collect()
}

pub(super) fn default_sizes() -> Vec<f64> {
    crate::input::settings::DEFAULT_SIZES.to_vec()
}

fn default_fade_enabled() -> bool {
    true
}

fn default_fade_delay_ms() -> u64 {
    200
}

fn default_fade_duration_ms() -> u64 {
    1000
}
