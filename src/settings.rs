//! Game settings and preferences
//!
//! Stored as JSON. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::{GameError, GameResult};
use crate::sim::Arena;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no game-over fireworks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Playfield described by these settings
    pub fn arena(&self) -> Arena {
        Arena {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    /// Effective fireworks (respects reduced_motion)
    pub fn effective_fireworks(&self) -> bool {
        !self.reduced_motion
    }

    /// Check ranges; volumes are clamped, canvas size must be positive
    pub fn validate(&mut self) -> GameResult<()> {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSetting {
                    name,
                    value,
                    expected: "(0, inf)",
                });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Failed to load {}: {}; using default settings",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
