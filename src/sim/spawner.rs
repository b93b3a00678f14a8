//! Enemy spawning
//!
//! A spawn attempt happens on every frame that is a multiple of the current
//! level's `enemy_frequency`, and succeeds only while fewer than
//! `max_enemies` obstacles are live. A skipped attempt is lost, not queued.

use rand::Rng;

use super::lane::LaneGeometry;
use super::state::{Obstacle, ObstacleId};
use crate::config::{GameConfig, Level};

/// Whether a spawn fires this frame
#[inline]
pub fn should_spawn(frame_count: u64, level: &Level, live: usize) -> bool {
    frame_count % u64::from(level.enemy_frequency) == 0 && live < level.max_enemies
}

/// Per-simulation obstacle factory (owns the id counter)
#[derive(Debug, Clone)]
pub struct Spawner {
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate a fresh obstacle id
    pub fn next_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Build an obstacle fully above the canvas in `lane`
    pub fn make_obstacle(&mut self, lane: u32, config: &GameConfig) -> Obstacle {
        let geo = LaneGeometry::new(config.canvas_width, config.lanes, config.obstacle_width);
        Obstacle {
            id: self.next_id(),
            lane,
            x: geo.lane_to_x(lane),
            y: -(config.obstacle_height as f32),
        }
    }

    /// Spawn attempt for this frame; appends to `obstacles` when it fires
    pub fn try_spawn<R: Rng>(
        &mut self,
        frame_count: u64,
        level: &Level,
        obstacles: &mut Vec<Obstacle>,
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<ObstacleId> {
        if !should_spawn(frame_count, level, obstacles.len()) {
            return None;
        }
        let lane = rng.random_range(0..config.lanes);
        let obstacle = self.make_obstacle(lane, config);
        let id = obstacle.id;
        log::debug!("spawn {id:?} in lane {lane} at frame {frame_count}");
        obstacles.push(obstacle);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence_easy_level() {
        let level = Level::new("EASY", 100, 3, 0);
        let fired: Vec<u64> = (1..=300)
            .filter(|&frame| should_spawn(frame, &level, 0))
            .collect();
        assert_eq!(fired, vec![100, 200, 300]);
    }

    #[test]
    fn test_capacity_gate() {
        let level = Level::new("EASY", 100, 3, 0);
        assert!(should_spawn(100, &level, 2));
        assert!(!should_spawn(100, &level, 3));
        assert!(!should_spawn(99, &level, 0));
    }

    #[test]
    fn test_missed_attempt_is_not_queued() {
        let config = GameConfig::default();
        let level = config.level(0).clone();
        let mut spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut obstacles = Vec::new();
        for _ in 0..3 {
            obstacles.push(spawner.make_obstacle(0, &config));
        }

        assert!(
            spawner
                .try_spawn(100, &level, &mut obstacles, &config, &mut rng)
                .is_none()
        );
        obstacles.pop();
        // Capacity frees up, but frame 101 is not a spawn frame
        assert!(
            spawner
                .try_spawn(101, &level, &mut obstacles, &config, &mut rng)
                .is_none()
        );
        assert!(
            spawner
                .try_spawn(200, &level, &mut obstacles, &config, &mut rng)
                .is_some()
        );
        assert_eq!(obstacles.len(), 3);
    }

    #[test]
    fn test_spawned_obstacle_placement() {
        let config = GameConfig::default();
        let geo = LaneGeometry::from_config(&config);
        let mut spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut obstacles = Vec::new();

        let id = spawner
            .try_spawn(100, config.level(0), &mut obstacles, &config, &mut rng)
            .unwrap();
        let obstacle = &obstacles[0];
        assert_eq!(obstacle.id, id);
        assert!(obstacle.lane < config.lanes);
        assert_eq!(obstacle.x, geo.lane_to_x(obstacle.lane));
        assert_eq!(obstacle.y, -60.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new();
        let mut ids: Vec<_> = (0..100)
            .map(|_| spawner.make_obstacle(1, &config).id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_lanes_cover_full_range() {
        let config = GameConfig::default();
        let level = Level::new("ANY", 1, usize::MAX, 0);
        let mut spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut obstacles = Vec::new();
        for frame in 1..=300 {
            spawner.try_spawn(frame, &level, &mut obstacles, &config, &mut rng);
        }
        for lane in 0..config.lanes {
            assert!(obstacles.iter().any(|o| o.lane == lane));
        }
    }
}
