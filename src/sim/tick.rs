//! Fixed-step frame update
//!
//! Each frame: count the frame, age the skin banner, attempt a spawn, then
//! walk the obstacles newest-first. Per obstacle the checks run in a fixed
//! order:
//! move → pass credit → collision → off-screen cull.
//! A collision ends the frame immediately.

use std::sync::Arc;

use super::player::Player;
use super::state::GameEvent;

/// Advance `player` by one frame
///
/// Returns false if the player was already dead or crashed this frame.
pub fn tick(player: &mut Player) -> bool {
    if !player.alive {
        return false;
    }

    player.frame_count += 1;
    player.skins.tick_notification();

    let config = Arc::clone(&player.config);
    let level = config.level(player.progress.level);
    if let Some(id) = player.spawner.try_spawn(
        player.frame_count,
        level,
        &mut player.obstacles,
        &config,
        &mut player.rng,
    ) {
        let lane = player.obstacles.last().map(|o| o.lane).unwrap_or(0);
        player.events.push(GameEvent::ObstacleSpawned { id, lane });
    }

    !advance_obstacles(player)
}

/// Move, score, collide and cull every obstacle; true on collision
fn advance_obstacles(player: &mut Player) -> bool {
    let rear_edge = player.position.y + player.config.player_height as f32;
    let canvas_height = player.config.canvas_height as f32;
    let points = player.config.points_per_pass;

    for i in (0..player.obstacles.len()).rev() {
        // Speed is re-read per obstacle: a pass earlier in this frame may
        // already have raised it.
        player.obstacles[i].y += player.progress.speed;
        let id = player.obstacles[i].id;

        if player.obstacles[i].y > rear_edge && player.passed.insert(id) {
            player.events.push(GameEvent::ObstaclePassed { id });
            player.add_score(points);
        }

        if player
            .bounds()
            .overlaps(&player.obstacles[i].bounds(&player.config))
        {
            player.alive = false;
            player.events.push(GameEvent::Collision);
            log::info!(
                "Player {} crashed at frame {} with {} points",
                player.number,
                player.frame_count,
                player.progress.score
            );
            return true;
        }

        if player.obstacles[i].y > canvas_height {
            player.passed.remove(&id);
            player.obstacles.remove(i);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::lane::LaneGeometry;

    fn player_with(config: GameConfig) -> Player {
        Player::new(1, Arc::new(config), 12345)
    }

    fn player() -> Player {
        player_with(GameConfig::default())
    }

    #[test]
    fn test_dead_player_is_frozen() {
        let mut p = player();
        p.alive = false;
        assert!(!tick(&mut p));
        assert_eq!(p.frame_count, 0);
    }

    #[test]
    fn test_first_spawn_at_frame_100() {
        let mut p = player();
        for _ in 0..99 {
            assert!(tick(&mut p));
        }
        assert!(p.obstacles.is_empty());

        tick(&mut p);
        assert_eq!(p.obstacles.len(), 1);
        // Spawned at -60 and moved once this frame
        assert_eq!(p.obstacles[0].y, -57.0);
    }

    #[test]
    fn test_pass_credits_once_in_other_lane() {
        let mut p = player();
        // Player in lane 1; obstacle in lane 0 just above the rear edge (580)
        let id = p.insert_obstacle(0, 578.0);

        assert!(tick(&mut p));
        assert_eq!(p.score(), 10);
        assert!(p.has_passed(id));

        assert!(tick(&mut p));
        assert_eq!(p.score(), 10);
        let passes = p
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_cull_forgets_passed_id() {
        let mut p = player();
        let id = p.insert_obstacle(0, 598.0);

        // 598 + 3 = 601: passes and leaves the canvas in the same frame
        assert!(tick(&mut p));
        assert_eq!(p.score(), 10);
        assert!(p.obstacles.is_empty());
        assert!(!p.has_passed(id));
        assert_eq!(p.passed_count(), 0);
    }

    #[test]
    fn test_collision_same_lane() {
        let mut p = player();
        let geo = LaneGeometry::from_config(p.config());
        p.position.x = geo.lane_to_x(1);
        // Front bumper at 520; obstacle rear at 458 + 3 + 60 = 521 after moving
        p.insert_obstacle(1, 458.0);

        assert!(!tick(&mut p));
        assert!(!p.alive);
        assert!(p.drain_events().contains(&GameEvent::Collision));
        // Further ticks are no-ops
        let frames = p.frame_count;
        assert!(!tick(&mut p));
        assert_eq!(p.frame_count, frames);
    }

    #[test]
    fn test_touching_is_not_a_collision() {
        let mut p = player();
        let geo = LaneGeometry::from_config(p.config());
        p.position.x = geo.lane_to_x(1);
        // After moving, obstacle rear bumper sits exactly on y=520
        p.insert_obstacle(1, 457.0);
        assert!(tick(&mut p));
        assert!(p.alive);
    }

    #[test]
    fn test_collision_short_circuits_frame() {
        let mut p = player();
        let geo = LaneGeometry::from_config(p.config());
        p.position.x = geo.lane_to_x(1);
        // Older obstacle (processed last) sits just above the rear edge
        let older = p.insert_obstacle(0, 578.0);
        // Newer obstacle (processed first) collides
        p.insert_obstacle(1, 500.0);

        assert!(!tick(&mut p));
        assert!(!p.has_passed(older));
        assert_eq!(p.score(), 0);
        assert_eq!(p.obstacles[0].y, 578.0);
    }

    #[test]
    fn test_speed_up_applies_to_later_obstacles_same_frame() {
        let config = GameConfig {
            points_per_pass: 10,
            speed_up_every: 10,
            ..Default::default()
        };
        let mut p = player_with(config);
        let trailing = p.insert_obstacle(0, 100.0);
        // Newest is processed first and scores, raising speed to 4.5
        p.insert_obstacle(2, 578.0);

        tick(&mut p);
        assert_eq!(p.speed(), 4.5);
        let y = p.obstacles.iter().find(|o| o.id == trailing).unwrap().y;
        assert_eq!(y, 104.5);
    }

    #[test]
    fn test_level_up_changes_cadence() {
        let mut p = player();
        p.add_score(50);
        assert_eq!(p.level().enemy_frequency, 70);
        for _ in 0..70 {
            tick(&mut p);
        }
        assert_eq!(p.obstacles.len(), 1);
    }

    #[test]
    fn test_skin_banner_clears_after_its_window() {
        let mut p = player();
        // Park the car off the road so nothing ends the run
        p.position.x = 10_000.0;
        p.add_score(500);
        assert!(p.skins.notification().is_some());

        for _ in 1..crate::skins::NOTIFICATION_FRAMES {
            tick(&mut p);
        }
        assert!(p.skins.notification().is_some());
        tick(&mut p);
        assert!(p.skins.notification().is_none());
    }

    #[test]
    fn test_determinism() {
        let config = Arc::new(GameConfig::default());
        let mut a = Player::new(1, config.clone(), 99999);
        let mut b = Player::new(1, config, 99999);

        for frame in 0..2_000 {
            if frame % 37 == 0 {
                a.move_left();
                b.move_left();
            }
            if frame % 53 == 0 {
                a.move_right();
                b.move_right();
            }
            assert_eq!(tick(&mut a), tick(&mut b));
        }

        assert_eq!(a.frame_count, b.frame_count);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_obstacle_cap_respected_over_long_run() {
        let mut p = player();
        // Park the car far off the road so nothing can hit it
        p.position.x = 10_000.0;
        for _ in 0..5_000 {
            tick(&mut p);
            let cap = p.level().max_enemies;
            assert!(p.obstacles.len() <= cap);
            assert!(p.passed_count() <= p.obstacles.len());
        }
        assert!(p.score() > 0);
    }
}
