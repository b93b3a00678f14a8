//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (newest obstacle first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lane;
pub mod player;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use lane::LaneGeometry;
pub use player::Player;
pub use progression::{Progression, ScoreChange};
pub use spawner::{Spawner, should_spawn};
pub use state::{GameEvent, Obstacle, ObstacleId};
pub use tick::tick;
