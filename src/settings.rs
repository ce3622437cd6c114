//! Game settings and preferences
//!
//! Stored as a JSON file next to the best score. Missing fields take their
//! defaults, and a missing or unreadable file means default settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_MUSIC_VOLUME;
use crate::persistence::StorageError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play sound effects
    pub sound_enabled: bool,
    /// Effect volume (0.0 - 1.0)
    pub volume: f32,
    /// Loop background music
    pub music_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Game ===
    /// Fixed RNG seed; a time-based seed when unset
    pub seed: Option<u64>,
    /// Where the best score is kept
    pub high_score_path: PathBuf,

    // === Demo ===
    /// Frames the headless demo runs for
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            volume: 0.8,
            music_enabled: true,
            music_volume: DEFAULT_MUSIC_VOLUME,
            seed: None,
            high_score_path: PathBuf::from("hopper_highscore.json"),
            demo_frames: 3600,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, StorageError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Volume actually applied, clamped to 0.0 - 1.0
    pub fn effective_volume(&self) -> f32 {
        clamped(self.volume)
    }

    pub fn effective_music_volume(&self) -> f32 {
        clamped(self.music_volume)
    }
}

fn clamped(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
