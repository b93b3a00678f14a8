//! Per-participant simulation state
//!
//! One `Player` per participant. Players never read each other's state, so
//! they can be ticked in any order.

use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::lane::LaneGeometry;
use super::progression::Progression;
use super::spawner::Spawner;
use super::state::{GameEvent, Obstacle, ObstacleId};
use crate::config::{GameConfig, Level};
use crate::platform::Controls;
use crate::skins::{self, SkinState};

/// A single player's run
#[derive(Debug, Clone)]
pub struct Player {
    /// Slot number (1 or 2)
    pub number: u8,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Top-left of the player's car in canvas space
    pub position: Vec2,
    pub alive: bool,
    pub progress: Progression,
    /// Frames simulated this run
    pub frame_count: u64,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub controls: Controls,
    pub skins: SkinState,
    pub(super) passed: HashSet<ObstacleId>,
    pub(super) spawner: Spawner,
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
    pub(super) config: Arc<GameConfig>,
}

impl Player {
    pub fn new(number: u8, config: Arc<GameConfig>, seed: u64) -> Self {
        Self {
            number,
            seed,
            position: Vec2::new(config.player_start_x(), config.player_start_y()),
            alive: true,
            progress: Progression::new(&config),
            frame_count: 0,
            obstacles: Vec::new(),
            controls: Controls::for_player(number),
            skins: SkinState::new(skins::palette_for(number)),
            passed: HashSet::new(),
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> &Level {
        self.config.level(self.progress.level)
    }

    pub fn speed(&self) -> f32 {
        self.progress.speed
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.progress.speed_multiplier
    }

    /// Record name used in the high-score table
    pub fn display_name(&self) -> String {
        format!("Player {}", self.number)
    }

    fn geometry(&self) -> LaneGeometry {
        LaneGeometry::from_config(&self.config)
    }

    /// Lane the player's car is currently in
    pub fn current_lane(&self) -> u32 {
        self.geometry().x_to_lane(self.position.x)
    }

    /// Snap one lane left (no-op in the left-most lane)
    pub fn move_left(&mut self) {
        let geo = self.geometry();
        let lane = geo.x_to_lane(self.position.x);
        if lane > 0 {
            self.position.x = geo.lane_to_x(lane - 1);
        }
    }

    /// Snap one lane right (no-op in the right-most lane)
    pub fn move_right(&mut self) {
        let geo = self.geometry();
        let lane = geo.x_to_lane(self.position.x);
        if lane < geo.last_lane() {
            self.position.x = geo.lane_to_x(lane + 1);
        }
    }

    /// Bounding box of the player's car
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.position.x,
            self.position.y,
            self.config.player_width as f32,
            self.config.player_height as f32,
        )
    }

    /// Whether `id` has already been credited
    pub fn has_passed(&self, id: ObstacleId) -> bool {
        self.passed.contains(&id)
    }

    /// Number of credited obstacles still on screen
    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    /// Place an obstacle in `lane` at height `y`, bypassing the spawn cadence
    pub fn insert_obstacle(&mut self, lane: u32, y: f32) -> ObstacleId {
        let mut obstacle = self.spawner.make_obstacle(lane, &self.config);
        obstacle.y = y;
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    /// Credit points, re-deriving speed, level and skin unlocks
    pub fn add_score(&mut self, points: u32) {
        let change = self.progress.add_score(points, &self.config);

        if let Some(multiplier) = change.speed_up {
            self.events.push(GameEvent::SpeedUp { multiplier });
        }
        if let Some(level) = change.level_up {
            log::info!(
                "Player {} reached level {}",
                self.number,
                self.config.level(level).name
            );
            self.events.push(GameEvent::LevelUp { level });
        }
        if change.crossed(self.config.skin_unlock_score) {
            if let Some(skin) = self.skins.unlock_random(&mut self.rng) {
                log::info!(
                    "Player {} unlocked skin {}",
                    self.number,
                    self.skins.palette[skin].name
                );
                self.events.push(GameEvent::SkinUnlocked { skin });
            }
        }
    }

    /// Advance one frame; false once the player has crashed
    pub fn update(&mut self) -> bool {
        super::tick::tick(self)
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
