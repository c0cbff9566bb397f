//! Bomb bookkeeping and bodies.
//!
//! Every collected star launches a bomb. [`HazardSet`] caps how many bombs can
//! exist in one session: below the cap a new bomb is appended, at the cap the
//! oldest bomb is relaunched from the spawn line instead. Bodies bounce with
//! full restitution and no friction, so they keep moving until the session
//! ends.

use crate::constants::BOMB_RADIUS;
use crate::gameplay::SessionEntity;
use crate::level::{Arena, BOMB_GROUP, PLAYER_GROUP, SCENERY_GROUP};
use crate::spawn::Hazard;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Where a new hazard landed in the [`HazardSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardPlacement {
    pub index: usize,
    pub hazard: Hazard,
    /// `true` when an existing bomb was reused rather than a new one appended.
    pub recycled: bool,
}

/// Launch records of every bomb in the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardSet {
    hazards: Vec<Hazard>,
    capacity: usize,
    next_recycle: usize,
}

impl HazardSet {
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "hazard capacity must be at least 1");
        Self {
            hazards: Vec::new(),
            capacity,
            next_recycle: 0,
        }
    }

    /// Append `hazard`, or overwrite the oldest one when the set is full.
    pub fn insert(&mut self, hazard: Hazard) -> HazardPlacement {
        if self.hazards.len() < self.capacity {
            self.hazards.push(hazard);
            return HazardPlacement {
                index: self.hazards.len() - 1,
                hazard,
                recycled: false,
            };
        }

        let index = self.next_recycle;
        self.hazards[index] = hazard;
        self.next_recycle = (self.next_recycle + 1) % self.capacity;
        HazardPlacement {
            index,
            hazard,
            recycled: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Hazard> {
        self.hazards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }
}

// ── ECS ───────────────────────────────────────────────────────────────────────

/// Links a bomb entity to its index in the [`HazardSet`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bomb {
    pub index: usize,
}

fn bomb_color() -> Color {
    Color::srgb(0.15, 0.15, 0.18)
}

/// Spawn a bomb body for a freshly appended hazard.
pub fn spawn_bomb(commands: &mut Commands, arena: &Arena, placement: &HazardPlacement) -> Entity {
    let hazard = placement.hazard;
    commands
        .spawn((
            Bomb {
                index: placement.index,
            },
            SessionEntity,
            Sprite::from_color(bomb_color(), Vec2::splat(BOMB_RADIUS * 2.0)),
            Transform::from_translation(arena.to_world(hazard.position).extend(0.6)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(BOMB_RADIUS),
            Velocity::linear(arena.velocity_to_world(hazard.velocity)),
            Restitution {
                coefficient: 1.0,
                combine_rule: CoefficientCombineRule::Max,
            },
            Friction {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            Ccd::enabled(),
            CollisionGroups::new(BOMB_GROUP, SCENERY_GROUP | PLAYER_GROUP),
        ))
        .id()
}

/// Move a recycled bomb back to the spawn line with its new launch velocity.
pub fn relaunch_bomb(commands: &mut Commands, entity: Entity, arena: &Arena, hazard: &Hazard) {
    commands.entity(entity).insert((
        Transform::from_translation(arena.to_world(hazard.position).extend(0.6)),
        Velocity::linear(arena.velocity_to_world(hazard.velocity)),
    ));
}
