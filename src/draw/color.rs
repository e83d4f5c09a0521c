//! RGBA color type and the overlay palette.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use telestrator::draw::Color;
/// let white = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
/// let half_blue = Color::new(0.0, 0.0, 1.0, 0.5);
/// assert_eq!(white.with_alpha(0.5).a, half_blue.a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from 0-255 channel values.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same color with its alpha multiplied by `alpha`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: self.a * alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Palette white (255, 255, 255)
pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

/// Palette near-black (26, 28, 44)
pub const NEAR_BLACK: Color = Color::from_rgb8(26, 28, 44);

/// Palette yellow (255, 247, 0)
pub const YELLOW: Color = Color::from_rgb8(255, 247, 0);

/// Palette orange (250, 148, 46)
pub const ORANGE: Color = Color::from_rgb8(250, 148, 46);

/// Palette blue (52, 205, 239)
pub const BLUE: Color = Color::from_rgb8(52, 205, 239);

/// Default pen color, a mid blue (#42a6f6)
pub const MID_BLUE: Color = Color::from_rgb8(66, 166, 246);

/// Neutral grey painted on the live surface while an eraser stroke is in progress
pub const ERASE_INDICATOR: Color = Color::from_rgb8(144, 144, 144);

/// The default palette in keyboard order.
pub const DEFAULT_PALETTE: [Color; 5] = [WHITE, NEAR_BLACK, YELLOW, ORANGE, BLUE];
