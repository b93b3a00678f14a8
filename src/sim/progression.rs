//! Score, speed and level progression
//!
//! Score only grows. Speed multiplier and level are step functions of the
//! cumulative score and never go down within a run.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Result of crediting points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreChange {
    pub old_score: u32,
    pub new_score: u32,
    /// New level index, if it changed
    pub level_up: Option<usize>,
    /// New speed multiplier, if it changed
    pub speed_up: Option<f32>,
}

impl ScoreChange {
    /// True when this change moved the score across `threshold` from below
    pub fn crossed(&self, threshold: u32) -> bool {
        self.old_score < threshold && self.new_score >= threshold
    }
}

/// Per-run score/level/speed state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u32,
    /// Index into the level table
    pub level: usize,
    pub speed_multiplier: f32,
    /// Scroll speed in canvas units per frame (`base_speed * speed_multiplier`)
    pub speed: f32,
}

impl Progression {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 0,
            speed_multiplier: 1.0,
            speed: config.base_speed,
        }
    }

    /// Multiplier earned by `score`
    pub fn multiplier_for(score: u32, config: &GameConfig) -> f32 {
        let steps = score / config.speed_up_every.max(1);
        1.0 + steps as f32 * config.speed_increment
    }

    /// Credit `points` and re-derive speed and level
    pub fn add_score(&mut self, points: u32, config: &GameConfig) -> ScoreChange {
        let old_score = self.score;
        self.score = self.score.saturating_add(points);

        let mut speed_up = None;
        let candidate = Self::multiplier_for(self.score, config);
        if candidate > self.speed_multiplier {
            self.speed_multiplier = candidate;
            self.speed = config.base_speed * self.speed_multiplier;
            speed_up = Some(candidate);
        }

        let mut level_up = None;
        let candidate = config.level_for_score(self.score);
        if candidate > self.level {
            self.level = candidate;
            level_up = Some(candidate);
        }

        ScoreChange {
            old_score,
            new_score: self.score,
            level_up,
            speed_up,
        }
    }
}
