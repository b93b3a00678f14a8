//! Game settings and preferences
//!
//! Persisted separately from high scores as a JSON file.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Ring the terminal bell on crashes
    pub terminal_bell: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Loop ===
    /// Frames (and simulation steps) per second
    pub target_fps: u32,

    // === Files ===
    /// High score file
    pub scores_file: String,
    /// Optional tuning override (JSON `GameConfig`)
    pub config_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.5,
            music_volume: 0.3,
            muted: false,
            terminal_bell: true,

            show_fps: false,

            target_fps: 60,

            scores_file: "scores.json".to_string(),
            config_file: None,
        }
    }
}

impl Settings {
    /// Effective sound effects volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Frame budget in microseconds
    pub fn frame_micros(&self) -> u64 {
        1_000_000 / u64::from(self.target_fps.clamp(1, 240))
    }

    /// Load settings from a JSON file (defaults if absent or corrupt)
    pub fn load(path: &Path) -> Self {
        let settings: Self = crate::persistence::load_json_or_default(path);
        log::info!("Settings loaded (target {} fps)", settings.target_fps);
        settings
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> io::Result<()> {
        crate::persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
