//! Bomb placement policy.
//!
//! New bombs drop from the top edge on the half of the arena the player is
//! *not* standing in, so a spawn never lands directly on the player. The
//! policy is a pure function of the player's x and a random source; the
//! physics substrate takes over once the bomb exists.

use crate::config::GameConfig;
use crate::constants::ARENA_WIDTH;
use bevy::prelude::*;
use rand::Rng;

/// A bomb as the encounter core sees it: where it entered the arena and how
/// fast it was launched. Arena coordinates, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Tuning values for bomb placement. Carries no per-session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub arena_width: f32,
    /// y of the line bombs appear on.
    pub spawn_y: f32,
    /// Horizontal launch speed is sampled from `[-drift_speed, drift_speed]`.
    pub drift_speed: f32,
    /// Fixed initial downward speed.
    pub fall_speed: f32,
}

impl SpawnPolicy {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            spawn_y: config.bomb_spawn_y,
            drift_speed: config.bomb_drift_speed,
            fall_speed: config.bomb_fall_speed,
        }
    }

    /// Pick a spawn point on the opposite half of the arena from `player_x`.
    ///
    /// A player exactly on the midline counts as being on the right half.
    pub fn choose_position<R: Rng>(&self, player_x: f32, rng: &mut R) -> Vec2 {
        let half = self.arena_width * 0.5;
        let x = if player_x < half {
            rng.gen_range(half..=self.arena_width)
        } else {
            rng.gen_range(0.0..=half)
        };
        Vec2::new(x, self.spawn_y)
    }

    /// Random left/right drift plus a small fixed fall speed.
    pub fn initial_velocity<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let vx = if self.drift_speed > 0.0 {
            rng.gen_range(-self.drift_speed..=self.drift_speed)
        } else {
            0.0
        };
        Vec2::new(vx, self.fall_speed)
    }

    pub fn spawn_hazard<R: Rng>(&self, player_x: f32, rng: &mut R) -> Hazard {
        Hazard {
            position: self.choose_position(player_x, rng),
            velocity: self.initial_velocity(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn policy() -> SpawnPolicy {
        SpawnPolicy::from_config(&GameConfig::default())
    }

    #[test]
    fn player_on_left_spawns_on_right_half() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let pos = policy().choose_position(100.0, &mut rng);
            assert!((400.0..=800.0).contains(&pos.x), "x = {}", pos.x);
        }
    }

    #[test]
    fn player_on_right_spawns_on_left_half() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let pos = policy().choose_position(700.0, &mut rng);
            assert!((0.0..=400.0).contains(&pos.x), "x = {}", pos.x);
        }
    }

    #[test]
    fn midline_counts_as_right_half() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(policy().choose_position(400.0, &mut rng).x <= 400.0);
        }
    }

    #[test]
    fn spawn_line_is_fixed() {
        let mut rng = StdRng::seed_from_u64(5);
        let pos = policy().choose_position(250.0, &mut rng);
        assert_eq!(pos.y, crate::constants::BOMB_SPAWN_Y);
    }

    #[test]
    fn velocity_drift_is_symmetric_and_fall_is_fixed() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..500 {
            let v = policy().initial_velocity(&mut rng);
            assert!((-200.0..=200.0).contains(&v.x));
            assert_eq!(v.y, 20.0);
            saw_left |= v.x < 0.0;
            saw_right |= v.x > 0.0;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn zero_drift_launches_straight_down() {
        let mut rng = StdRng::seed_from_u64(1);
        let still = SpawnPolicy {
            drift_speed: 0.0,
            ..policy()
        };
        assert_eq!(still.initial_velocity(&mut rng).x, 0.0);
    }
}
