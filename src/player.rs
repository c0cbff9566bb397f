//! Player avatar: spawn, input, ground tracking and per-frame motion.
//!
//! ## Pipeline (every `Update` frame while playing)
//!
//! 1. [`player_intent_clear_system`] resets [`PlayerIntent`].
//! 2. [`keyboard_to_intent_system`] / [`gamepad_to_intent_system`] fill it.
//! 3. [`ground_contact_system`] tracks which platforms the player touches.
//! 4. [`apply_player_motion_system`] asks the encounter core for this
//!    frame's motion and writes it to the Rapier `Velocity`.
//!
//! Tests can populate `PlayerIntent` directly and skip the input systems.

use crate::config::GameConfig;
use crate::constants::{GROUND_TOLERANCE, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::encounter::EncounterController;
use crate::gameplay::SessionEntity;
use crate::level::{Arena, Platform, BOMB_GROUP, PLAYER_GROUP, SCENERY_GROUP, STAR_GROUP};
use bevy::input::gamepad::{GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Stick deflection below which the gamepad counts as centred.
const STICK_DEADZONE: f32 = 0.25;

// ── Components & resources ────────────────────────────────────────────────────

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Which way the player sprite faces.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    Right,
    /// Idle pose, also used once the player is hit.
    #[default]
    Front,
}

/// Platforms the player body currently touches.
#[derive(Component, Debug, Default)]
pub struct GroundContacts(pub Vec<Entity>);

/// Aggregated movement intent for the current frame, from all input sources.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    /// `-1.0` = left, `1.0` = right, `0.0` = no horizontal input.
    pub horizontal: f32,
    /// A jump was requested this frame.
    pub jump: bool,
}

/// Most recently connected gamepad, preferred over earlier ones.
#[derive(Resource, Default)]
pub struct PreferredGamepad(pub Option<Entity>);

fn player_color() -> Color {
    Color::srgb(0.55, 0.35, 0.75)
}

/// Tint applied when a bomb hits the player.
pub fn hit_color() -> Color {
    Color::srgb(1.0, 0.0, 0.0)
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Spawn the player at the configured start point.
pub fn spawn_player(commands: &mut Commands, arena: &Arena, config: &GameConfig) -> Entity {
    let start = arena.to_world(Vec2::new(config.player_start_x, config.player_start_y));
    commands
        .spawn((
            Player,
            SessionEntity,
            Facing::default(),
            GroundContacts::default(),
            Sprite::from_color(player_color(), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            Transform::from_translation(start.extend(1.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::cuboid(PLAYER_WIDTH * 0.5, PLAYER_HEIGHT * 0.5),
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            Restitution {
                coefficient: config.player_bounce,
                combine_rule: CoefficientCombineRule::Max,
            },
            Friction {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            CollisionGroups::new(PLAYER_GROUP, SCENERY_GROUP | STAR_GROUP | BOMB_GROUP),
            SolverGroups::new(PLAYER_GROUP, SCENERY_GROUP | BOMB_GROUP),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

/// Turn the player red and face the camera.
pub fn mark_player_hit(sprite: &mut Sprite, facing: &mut Facing) {
    sprite.color = hit_color();
    *facing = Facing::Front;
    sprite.flip_x = false;
}

// ── Input ─────────────────────────────────────────────────────────────────────

pub fn player_intent_clear_system(mut intent: ResMut<PlayerIntent>) {
    *intent = PlayerIntent::default();
}

/// Arrow keys or A/D move, Up/W/Space jump. Left wins when both directions
/// are held.
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
    if keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        intent.horizontal = -1.0;
    } else if keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        intent.horizontal = 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space]) {
        intent.jump = true;
    }
}

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!("[gamepad] Gamepad {:?} connected (now preferred)", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] Gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// D-pad or left stick move, South jumps. Only overrides keyboard input when
/// the pad is actually deflected.
pub fn gamepad_to_intent_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    mut intent: ResMut<PlayerIntent>,
) {
    let Some(gamepad) = preferred.0.and_then(|entity| gamepads.get(entity).ok()) else {
        return;
    };

    let stick_x = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
    if gamepad.pressed(GamepadButton::DPadLeft) || stick_x < -STICK_DEADZONE {
        intent.horizontal = -1.0;
    } else if gamepad.pressed(GamepadButton::DPadRight) || stick_x > STICK_DEADZONE {
        intent.horizontal = 1.0;
    }
    if gamepad.pressed(GamepadButton::South) {
        intent.jump = true;
    }
}

// ── Ground tracking ───────────────────────────────────────────────────────────

/// Keep [`GroundContacts`] in sync with player/platform contact events.
pub fn ground_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut players: Query<(Entity, &mut GroundContacts), With<Player>>,
    platforms: Query<(), With<Platform>>,
) {
    let Ok((player_entity, mut contacts)) = players.single_mut() else {
        return;
    };

    for event in collision_events.read() {
        let (e1, e2, started) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2, true),
            CollisionEvent::Stopped(e1, e2, _) => (*e1, *e2, false),
        };
        let platform = if e1 == player_entity {
            e2
        } else if e2 == player_entity {
            e1
        } else {
            continue;
        };
        if !platforms.contains(platform) {
            continue;
        }

        if started {
            if !contacts.0.contains(&platform) {
                contacts.0.push(platform);
            }
        } else {
            contacts.0.retain(|&e| e != platform);
        }
    }
}

/// `true` when the player's feet rest on the top of a touched platform.
/// Side and underside contacts do not count.
pub fn is_grounded(
    player_y: f32,
    contacts: &GroundContacts,
    platforms: &Query<&Platform>,
) -> bool {
    let feet = player_y - PLAYER_HEIGHT * 0.5;
    contacts.0.iter().any(|&entity| {
        platforms
            .get(entity)
            .is_ok_and(|platform| (feet - platform.top).abs() <= GROUND_TOLERANCE)
    })
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Per-frame update hook: apply the encounter core's motion to the player body.
///
/// Does nothing once the session is over.
pub fn apply_player_motion_system(
    intent: Res<PlayerIntent>,
    controller: Res<EncounterController>,
    platforms: Query<&Platform>,
    mut players: Query<
        (&Transform, &GroundContacts, &mut Velocity, &mut Facing, &mut Sprite),
        With<Player>,
    >,
) {
    let Ok((transform, contacts, mut velocity, mut facing, mut sprite)) = players.single_mut()
    else {
        return;
    };

    let grounded = is_grounded(transform.translation.y, contacts, &platforms);
    let Some(motion) = controller.on_frame_update(&intent, grounded) else {
        return;
    };

    velocity.linvel.x = motion.velocity_x;
    if let Some(jump) = motion.jump_velocity {
        velocity.linvel.y = jump;
    }
    if *facing != motion.facing {
        *facing = motion.facing;
        sprite.flip_x = motion.facing == Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PlayerIntent::default());
        app.insert_resource(EncounterController::from_config(
            &GameConfig::default(),
            &mut StdRng::seed_from_u64(9),
        ));
        app.add_systems(Update, apply_player_motion_system);
        app
    }

    /// Spawn a platform whose top is at y = 0 and a player standing on it
    /// (or hovering `lift` above it).
    fn spawn_on_platform(app: &mut App, lift: f32) -> Entity {
        let platform = app.world_mut().spawn(Platform { top: 0.0 }).id();
        app.world_mut()
            .spawn((
                Player,
                Facing::default(),
                GroundContacts(vec![platform]),
                Sprite::default(),
                Transform::from_xyz(0.0, PLAYER_HEIGHT * 0.5 + lift, 1.0),
                Velocity::zero(),
            ))
            .id()
    }

    #[test]
    fn right_intent_sets_run_speed_and_facing() {
        let mut app = build_test_app();
        let player = spawn_on_platform(&mut app, 0.0);
        app.insert_resource(PlayerIntent {
            horizontal: 1.0,
            jump: false,
        });
        app.update();

        let entity = app.world().entity(player);
        assert_eq!(entity.get::<Velocity>().unwrap().linvel.x, 160.0);
        assert_eq!(*entity.get::<Facing>().unwrap(), Facing::Right);
    }

    #[test]
    fn jump_only_applies_when_grounded() {
        let mut app = build_test_app();
        let grounded = spawn_on_platform(&mut app, 0.0);
        app.insert_resource(PlayerIntent {
            horizontal: 0.0,
            jump: true,
        });
        app.update();
        assert_eq!(
            app.world().entity(grounded).get::<Velocity>().unwrap().linvel.y,
            330.0
        );

        let mut app = build_test_app();
        let airborne = spawn_on_platform(&mut app, 40.0);
        app.insert_resource(PlayerIntent {
            horizontal: 0.0,
            jump: true,
        });
        app.update();
        assert_eq!(
            app.world().entity(airborne).get::<Velocity>().unwrap().linvel.y,
            0.0
        );
    }

    #[test]
    fn motion_is_frozen_after_game_over() {
        let mut app = build_test_app();
        let player = spawn_on_platform(&mut app, 0.0);
        app.world_mut()
            .resource_mut::<EncounterController>()
            .on_player_hazard_collision();
        app.insert_resource(PlayerIntent {
            horizontal: -1.0,
            jump: true,
        });
        app.update();

        let velocity = app.world().entity(player).get::<Velocity>().unwrap().linvel;
        assert_eq!(velocity, Vec2::ZERO);
    }

    #[test]
    fn mark_player_hit_tints_red_and_faces_front() {
        let mut sprite = Sprite::default();
        let mut facing = Facing::Left;
        mark_player_hit(&mut sprite, &mut facing);
        assert_eq!(sprite.color, hit_color());
        assert_eq!(facing, Facing::Front);
    }
}
