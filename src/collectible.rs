//! Star pool: the fixed set of collectibles and their ECS bodies.
//!
//! [`CollectibleField`] is the authoritative record of which stars are still
//! in play. Its pool size is fixed at construction; only each star's `active`
//! flag and vertical position change. The ECS side ([`Star`] entities) mirrors
//! it: a collected star has its body and collider disabled and is hidden, and
//! a field reset drops every star again from the top edge.

use crate::config::GameConfig;
use crate::constants::STAR_RADIUS;
use crate::gameplay::SessionEntity;
use crate::level::{Arena, PLAYER_GROUP, SCENERY_GROUP, STAR_GROUP};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;
use std::ops::RangeInclusive;

// ── Field ─────────────────────────────────────────────────────────────────────

/// One star slot. Arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub active: bool,
    /// Bounce coefficient handed to the physics body.
    pub restitution: f32,
}

/// Fixed-size pool of stars.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleField {
    slots: Vec<Collectible>,
}

impl CollectibleField {
    /// Lay out `count` stars in a row starting at `(start_x, start_y)`, spaced
    /// `spacing_x` apart, each with its own restitution drawn from `restitution`.
    pub fn initialize<R: Rng>(
        count: usize,
        spacing_x: f32,
        start_x: f32,
        start_y: f32,
        restitution: RangeInclusive<f32>,
        rng: &mut R,
    ) -> Self {
        let slots = (0..count)
            .map(|i| Collectible {
                x: start_x + spacing_x * i as f32,
                y: start_y,
                active: true,
                restitution: rng.gen_range(restitution.clone()),
            })
            .collect();
        Self { slots }
    }

    pub fn from_config<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self::initialize(
            config.star_count,
            config.star_spacing,
            config.star_start_x,
            config.star_start_y,
            config.star_bounce_min..=config.star_bounce_max,
            rng,
        )
    }

    #[inline]
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Collectible> {
        self.slots.get(slot)
    }

    /// `false` for inactive stars and for slots outside the pool.
    pub fn is_active(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|c| c.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Collectible)> {
        self.slots.iter().enumerate()
    }

    pub fn count_active(&self) -> usize {
        self.slots.iter().filter(|c| c.active).count()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.count_active() == 0
    }

    /// Mark one star as collected.
    ///
    /// # Panics
    /// If `slot` is outside the pool or the star is already inactive.
    pub fn deactivate(&mut self, slot: usize) {
        let pool_size = self.slots.len();
        let Some(star) = self.slots.get_mut(slot) else {
            panic!("star slot {slot} is outside the pool of {pool_size}");
        };
        assert!(star.active, "star slot {slot} deactivated twice");
        star.active = false;
    }

    /// Reactivate every star at its original x on the top edge (y = 0).
    ///
    /// # Panics
    /// If any star is still active.
    pub fn reset_all(&mut self) {
        assert!(
            self.is_exhausted(),
            "reset_all called with {} stars still active",
            self.count_active()
        );
        for star in &mut self.slots {
            star.active = true;
            star.y = 0.0;
        }
    }
}

// ── ECS ───────────────────────────────────────────────────────────────────────

/// Links a star entity to its slot in the [`CollectibleField`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub slot: usize,
}

fn star_color() -> Color {
    Color::srgb(1.0, 0.85, 0.2)
}

/// Spawn the physics body for one star.
///
/// Stars rest on scenery and report contacts with the player, but the solver
/// groups keep the player from pushing them: touching a star is an overlap,
/// not a collision.
pub fn spawn_star(
    commands: &mut Commands,
    arena: &Arena,
    slot: usize,
    star: &Collectible,
) -> Entity {
    let position = arena.to_world(Vec2::new(star.x, star.y));
    let mut entity = commands.spawn((
        Star { slot },
        SessionEntity,
        Sprite::from_color(star_color(), Vec2::splat(STAR_RADIUS * 2.0)),
        Transform::from_translation(position.extend(0.5)),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::ball(STAR_RADIUS),
        Velocity::zero(),
        // Max so resting on zero-bounce scenery keeps the sampled bounce.
        Restitution {
            coefficient: star.restitution,
            combine_rule: CoefficientCombineRule::Max,
        },
        LockedAxes::ROTATION_LOCKED,
        CollisionGroups::new(STAR_GROUP, SCENERY_GROUP | PLAYER_GROUP),
        SolverGroups::new(STAR_GROUP, SCENERY_GROUP),
    ));
    if !star.active {
        entity.insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
    }
    entity.id()
}

/// Spawn one entity per slot of `field`.
pub fn spawn_stars(commands: &mut Commands, arena: &Arena, field: &CollectibleField) {
    for (slot, star) in field.iter() {
        spawn_star(commands, arena, slot, star);
    }
}

/// Take a collected star out of the simulation and hide it.
pub fn hide_star(commands: &mut Commands, entity: Entity) {
    commands
        .entity(entity)
        .insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
}

/// Put a star back at its field position and let it fall again.
pub fn drop_star(commands: &mut Commands, entity: Entity, arena: &Arena, star: &Collectible) {
    let position = arena.to_world(Vec2::new(star.x, star.y));
    commands
        .entity(entity)
        .remove::<(RigidBodyDisabled, ColliderDisabled)>()
        .insert((
            Transform::from_translation(position.extend(0.5)),
            Velocity::zero(),
            Visibility::Inherited,
        ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> CollectibleField {
        CollectibleField::initialize(12, 70.0, 14.0, 0.0, 0.4..=0.8, &mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn initialize_lays_out_a_spaced_row() {
        let field = field();
        assert_eq!(field.pool_size(), 12);
        assert_eq!(field.count_active(), 12);
        for (slot, star) in field.iter() {
            assert_eq!(star.x, 14.0 + 70.0 * slot as f32);
            assert_eq!(star.y, 0.0);
            assert!((0.4..=0.8).contains(&star.restitution));
        }
    }

    #[test]
    fn restitution_is_sampled_per_star() {
        let field = field();
        let first = field.get(0).unwrap().restitution;
        assert!(field.iter().any(|(_, s)| s.restitution != first));
    }

    #[test]
    fn count_active_stays_within_pool_bounds() {
        let mut field = field();
        for slot in 0..field.pool_size() {
            field.deactivate(slot);
            let active = field.count_active();
            assert!(active <= field.pool_size());
            assert_eq!(active, field.pool_size() - slot - 1);
        }
        assert!(field.is_exhausted());
    }

    #[test]
    fn reset_all_restores_every_star_at_the_top() {
        let mut field = CollectibleField::initialize(
            3,
            70.0,
            14.0,
            120.0,
            0.5..=0.5,
            &mut StdRng::seed_from_u64(1),
        );
        for slot in 0..3 {
            field.deactivate(slot);
        }
        assert_eq!(field.count_active(), 0);
        field.reset_all();
        assert_eq!(field.count_active(), field.pool_size());
        assert!(field.iter().all(|(_, s)| s.active && s.y == 0.0));
        assert_eq!(field.get(2).unwrap().x, 154.0);
    }

    #[test]
    #[should_panic(expected = "still active")]
    fn reset_all_requires_an_exhausted_field() {
        let mut field = field();
        field.deactivate(0);
        field.reset_all();
    }

    #[test]
    #[should_panic(expected = "deactivated twice")]
    fn deactivating_an_inactive_star_panics() {
        let mut field = field();
        field.deactivate(3);
        field.deactivate(3);
    }

    #[test]
    #[should_panic(expected = "outside the pool")]
    fn deactivating_an_unknown_slot_panics() {
        let mut field = field();
        field.deactivate(12);
    }

    #[test]
    fn is_active_is_false_outside_the_pool() {
        assert!(!field().is_active(99));
    }
}
