//! Immutable game tuning
//!
//! One `GameConfig` value is built at startup and shared (via `Arc`) by the
//! controller and every player simulation. Nothing in the simulation reads
//! global mutable state.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A difficulty tier, selected by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Frames between spawn attempts
    pub enemy_frequency: u32,
    /// Cap on concurrently live obstacles
    pub max_enemies: usize,
    /// Score at which this tier is reached
    pub min_score: u32,
}

impl Level {
    pub fn new(name: &str, enemy_frequency: u32, max_enemies: usize, min_score: u32) -> Self {
        Self {
            name: name.to_string(),
            enemy_frequency,
            max_enemies,
            min_score,
        }
    }
}

/// Default difficulty table (easy, medium, hard)
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new("EASY", 100, 3, 0),
        Level::new("MEDIUM", 70, 4, 50),
        Level::new("HARD", 50, 5, 100),
    ]
}

/// Simulation tuning shared by all participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub lanes: u32,

    // === Cars ===
    pub player_width: u32,
    pub player_height: u32,
    /// Gap between the player's rear bumper and the bottom edge
    pub player_bottom_margin: u32,
    pub obstacle_width: u32,
    pub obstacle_height: u32,

    // === Pace ===
    pub base_speed: f32,
    pub speed_increment: f32,
    /// Score step between speed-ups
    pub speed_up_every: u32,
    pub points_per_pass: u32,

    // === Progression ===
    pub levels: Vec<Level>,
    pub skin_unlock_score: u32,
    pub max_high_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 600,
            lanes: 3,

            player_width: 40,
            player_height: 60,
            player_bottom_margin: 20,
            obstacle_width: 40,
            obstacle_height: 60,

            base_speed: 3.0,
            speed_increment: 0.5,
            speed_up_every: 10,
            points_per_pass: 10,

            levels: default_levels(),
            skin_unlock_score: 500,
            max_high_scores: 3,
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoLanes,
    NoLevels,
    FirstLevelNotZero,
    ZeroFrequency { level: usize },
    LevelsNotOrdered { level: usize },
    ZeroSpeedStep,
    CarWiderThanLane,
    CanvasTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLanes => write!(f, "at least one lane is required"),
            ConfigError::NoLevels => write!(f, "level table is empty"),
            ConfigError::FirstLevelNotZero => write!(f, "first level must start at score 0"),
            ConfigError::ZeroFrequency { level } => {
                write!(f, "level {level} has an enemy frequency of zero")
            }
            ConfigError::LevelsNotOrdered { level } => {
                write!(f, "level {level} is not strictly harder than the level before it")
            }
            ConfigError::ZeroSpeedStep => write!(f, "speed_up_every must be positive"),
            ConfigError::CarWiderThanLane => write!(f, "cars do not fit inside a lane"),
            ConfigError::CanvasTooShort => {
                write!(f, "canvas is shorter than the player car and its margin")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.speed_up_every == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        let slot = self.canvas_width / self.lanes;
        if self.player_width > slot || self.obstacle_width > slot {
            return Err(ConfigError::CarWiderThanLane);
        }
        let player_extent = self.player_height.saturating_add(self.player_bottom_margin);
        if self.canvas_height < player_extent {
            return Err(ConfigError::CanvasTooShort);
        }

        let first = self.levels.first().ok_or(ConfigError::NoLevels)?;
        if first.min_score != 0 {
            return Err(ConfigError::FirstLevelNotZero);
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.enemy_frequency == 0 {
                return Err(ConfigError::ZeroFrequency { level: i });
            }
        }
        for (i, pair) in self.levels.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let harder = next.enemy_frequency < prev.enemy_frequency
                && next.max_enemies > prev.max_enemies
                && next.min_score > prev.min_score;
            if !harder {
                return Err(ConfigError::LevelsNotOrdered { level: i + 1 });
            }
        }
        Ok(())
    }

    /// Highest level index reached at `score`
    pub fn level_for_score(&self, score: u32) -> usize {
        self.levels
            .iter()
            .rposition(|l| score >= l.min_score)
            .unwrap_or(0)
    }

    /// Level entry, clamped to the table
    pub fn level(&self, index: usize) -> &Level {
        let last = self.levels.len().saturating_sub(1);
        &self.levels[index.min(last)]
    }

    /// Starting y of the player car
    pub fn player_start_y(&self) -> f32 {
        self.canvas_height
            .saturating_sub(self.player_height)
            .saturating_sub(self.player_bottom_margin) as f32
    }

    /// Starting x of the player car (horizontally centred on the canvas)
    pub fn player_start_x(&self) -> f32 {
        (self.canvas_width / 2 - self.player_width / 2) as f32
    }

    /// Load from a JSON file, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        let config: Self = crate::persistence::load_json_or_default(path);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid game config in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
