//! Arena geometry: coordinate mapping, collision layers, platforms and walls.
//!
//! Gameplay values are expressed in **arena coordinates** (origin top-left,
//! y down) so they read the same as the level layout. [`Arena`] converts them
//! into Bevy world space (origin at the centre, y up), which the default
//! `Camera2d` shows one pixel per unit.
//!
//! ## Collision layers
//!
//! | Layer    | Group     | Collides with          | Pushes against   |
//! |----------|-----------|------------------------|------------------|
//! | Scenery  | `GROUP_1` | everything             | everything       |
//! | Player   | `GROUP_2` | scenery, stars, bombs  | scenery, bombs   |
//! | Stars    | `GROUP_3` | scenery, player        | scenery          |
//! | Bombs    | `GROUP_4` | scenery, player        | scenery, player  |
//!
//! Player/star contacts still raise `CollisionEvent`s but the solver groups
//! keep them from exchanging forces, which is how an overlap is modelled.

use crate::config::GameConfig;
use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, PLATFORM_LAYOUT, WALL_THICKNESS};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub const SCENERY_GROUP: Group = Group::GROUP_1;
pub const PLAYER_GROUP: Group = Group::GROUP_2;
pub const STAR_GROUP: Group = Group::GROUP_3;
pub const BOMB_GROUP: Group = Group::GROUP_4;

/// Size of the play field and the mapping between arena and world space.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    /// Arena position → world position.
    #[inline]
    pub fn to_world(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x - self.width * 0.5, self.height * 0.5 - position.y)
    }

    /// World position → arena position.
    #[inline]
    pub fn to_arena(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x + self.width * 0.5, self.height * 0.5 - position.y)
    }

    /// Arena velocity (y down) → world velocity (y up).
    #[inline]
    pub fn velocity_to_world(&self, velocity: Vec2) -> Vec2 {
        Vec2::new(velocity.x, -velocity.y)
    }
}

/// A static ledge. `top` is the world-space y of its walkable surface.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub top: f32,
}

/// Invisible boundary around the arena.
#[derive(Component)]
pub struct Wall;

fn platform_color() -> Color {
    Color::srgb(0.32, 0.55, 0.22)
}

/// Sky colour used as the clear colour.
pub fn sky_color() -> Color {
    Color::srgb(0.45, 0.72, 0.95)
}

/// Startup: point gravity down and scale it to the configured strength.
pub fn setup_physics(mut config: Query<&mut RapierConfiguration>, game: Res<GameConfig>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::new(0.0, -game.gravity);
    }
}

/// Startup: insert the [`Arena`] resource and spawn camera, platforms and walls.
pub fn spawn_level(mut commands: Commands) {
    let arena = Arena::default();
    commands.insert_resource(arena);

    commands.spawn(Camera2d);

    for (x, y, width, height) in PLATFORM_LAYOUT {
        let center = arena.to_world(Vec2::new(x, y));
        commands.spawn((
            Platform {
                top: center.y + height * 0.5,
            },
            Sprite::from_color(platform_color(), Vec2::new(width, height)),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(width * 0.5, height * 0.5),
            CollisionGroups::new(SCENERY_GROUP, Group::ALL),
        ));
    }

    // Walls sit just outside each edge so bodies stop at the arena border.
    let half_w = arena.width * 0.5;
    let half_h = arena.height * 0.5;
    let half_t = WALL_THICKNESS * 0.5;
    let walls = [
        (Vec2::new(-half_w - half_t, 0.0), Vec2::new(half_t, half_h + WALL_THICKNESS)),
        (Vec2::new(half_w + half_t, 0.0), Vec2::new(half_t, half_h + WALL_THICKNESS)),
        (Vec2::new(0.0, half_h + half_t), Vec2::new(half_w + WALL_THICKNESS, half_t)),
        (Vec2::new(0.0, -half_h - half_t), Vec2::new(half_w + WALL_THICKNESS, half_t)),
    ];
    for (center, half_extents) in walls {
        commands.spawn((
            Wall,
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            CollisionGroups::new(SCENERY_GROUP, PLAYER_GROUP | BOMB_GROUP),
        ));
    }

    info!(
        "[level] Arena {}x{} with {} platforms",
        arena.width,
        arena.height,
        PLATFORM_LAYOUT.len()
    );
}
