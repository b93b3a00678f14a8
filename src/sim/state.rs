//! Simulation entity types
//!
//! Obstacles and the events a player simulation reports to the controller.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Identity of an obstacle, unique within one player simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// An enemy car scrolling down the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lane: u32,
    /// Left edge, fixed for the obstacle's lifetime
    pub x: f32,
    /// Top edge; starts above the canvas and grows each frame
    pub y: f32,
}

impl Obstacle {
    pub fn bounds(&self, config: &GameConfig) -> Aabb {
        Aabb::new(
            self.x,
            self.y,
            config.obstacle_width as f32,
            config.obstacle_height as f32,
        )
    }
}

/// Things that happened during a tick (drained by the controller)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: ObstacleId, lane: u32 },
    /// An obstacle cleared the player's rear bumper and scored
    ObstaclePassed { id: ObstacleId },
    LevelUp { level: usize },
    SpeedUp { multiplier: f32 },
    SkinUnlocked { skin: usize },
    Collision,
}
