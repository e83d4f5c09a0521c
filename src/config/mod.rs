//! Configuration file support for telestrator.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/telestrator/config.toml`. Settings include the starting tool
//! settings, the palette and size lists, fade timing, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, FadeConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MIN_SIZE: f64 = 1.0;
const MAX_SIZE: f64 = 128.0;
const MAX_FADE_DELAY_MS: u64 = 10_000;
const MIN_FADE_DURATION_MS: u64 = 16;
const MAX_FADE_DURATION_MS: u64 = 60_000;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "yellow"
/// default_size = 16.0
/// pressure_enabled = true
/// sizes = [8.0, 16.0, 32.0]
///
/// [fade]
/// enabled = true
/// delay_ms = 200
/// duration_ms = 1000
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool settings, palette and size lists
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Fade-out timing for committed marks
    #[serde(default)]
    pub fade: FadeConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_size` and every entry of `sizes`: 1.0 - 128.0
    /// - `fade.delay_ms`: 0 - 10000
    /// - `fade.duration_ms`: 16 - 60000
    ///
    /// Empty palette or size lists fall back to their defaults.
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.drawing.default_size) {
            log::warn!(
                "Invalid default_size {:.1}, clamping to 1.0-128.0 range",
                self.drawing.default_size
            );
            self.drawing.default_size = clamp_size(self.drawing.default_size);
        }

        if self.drawing.sizes.is_empty() {
            log::warn!("Empty sizes list, using defaults");
            self.drawing.sizes = types::default_sizes();
        }
        for (i, size) in self.drawing.sizes.iter_mut().enumerate() {
            if !(MIN_SIZE..=MAX_SIZE).contains(size) {
                log::warn!(
                    "Invalid sizes[{}] = {:.1}, clamping to 1.0-128.0 range",
                    i,
                    size
                );
                *size = clamp_size(*size);
            }
        }

        if self.drawing.palette.is_empty() {
            log::warn!("Empty palette, using defaults");
            self.drawing.palette = types::default_palette();
        }

        if self.fade.delay_ms > MAX_FADE_DELAY_MS {
            log::warn!(
                "Invalid fade delay_ms {}, clamping to 0-10000 range",
                self.fade.delay_ms
            );
            self.fade.delay_ms = MAX_FADE_DELAY_MS;
        }

        if !(MIN_FADE_DURATION_MS..=MAX_FADE_DURATION_MS).contains(&self.fade.duration_ms) {
            log::warn!(
                "Invalid fade duration_ms {}, clamping to 16-60000 range",
                self.fade.duration_ms
            );
            self.fade.duration_ms = self
                .fade
                .duration_ms
                .clamp(MIN_FADE_DURATION_MS, MAX_FADE_DURATION_MS);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/telestrator/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("telestrator");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// no file exists there.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_size(size: f64) -> f64 {
    if size.is_nan() {
        MIN_SIZE
    } else {
        size.clamp(MIN_SIZE, MAX_SIZE)
    }
}
