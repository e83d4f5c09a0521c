//! Engine options derived from the configuration file.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::config::{Action, Config, KeyBinding, KeybindingsConfig};
use crate::input::ToolSettings;

/// Everything the overlay needs from the configuration.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Starting tool settings, palette and size lists
    pub settings: ToolSettings,
    /// Whether fading starts enabled
    pub fading_enabled: bool,
    /// Hold before a committed mark starts fading
    pub fade_delay: Duration,
    /// Time for a mark to fade from full strength to gone
    pub fade_duration: Duration,
    /// Keybinding lookup
    pub action_map: HashMap<KeyBinding, Action>,
}

impl OverlayOptions {
    /// Builds options from a validated configuration.
    ///
    /// # Errors
    /// Returns an error when a keybinding string is invalid or bound twice.
    pub fn from_config(config: &Config) -> Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow!("Invalid keybindings: {e}"))?;

        let drawing = &config.drawing;
        let settings = ToolSettings::new(
            drawing.default_color.to_color(),
            drawing.default_size,
            drawing.pressure_enabled,
            drawing.palette.iter().map(|spec| spec.to_color()).collect(),
            drawing.sizes.clone(),
        );

        Ok(Self {
            settings,
            fading_enabled: config.fade.enabled,
            fade_delay: Duration::from_millis(config.fade.delay_ms),
            fade_duration: Duration::from_millis(config.fade.duration_ms),
            action_map,
        })
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            settings: ToolSettings::default(),
            fading_enabled: true,
            fade_delay: Duration::from_millis(200),
            fade_duration: Duration::from_millis(1000),
            action_map: KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default(),
        }
    }
}
