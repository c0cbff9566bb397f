//! ECS glue between Rapier contact events and the encounter core.
//!
//! ## Systems (registered by `GameplayPlugin`)
//!
//! | System                        | Schedule                     | Purpose                                  |
//! |-------------------------------|------------------------------|------------------------------------------|
//! | `load_game_config`            | `Startup`                    | Read `assets/game.toml`                  |
//! | `setup_physics`               | `Startup`                    | Point gravity down                       |
//! | `spawn_level`                 | `Startup`                    | Camera, platforms, walls, `Arena`        |
//! | `start_session`               | `Startup`                    | Controller + player / stars              |
//! | input systems                 | `Update / Input, Playing`    | Fill `PlayerIntent`                      |
//! | `ground_contact_system`       | `Update / Encounter`         | Track platform contacts                  |
//! | `hazard_collision_system`     | `Update / Encounter`         | Player ↔ bomb → game over                |
//! | `collectible_overlap_system`  | `Update / Encounter`         | Player ↔ star → score, bomb              |
//! | `handle_restart_requests`     | `Update / Encounter`         | `RestartRequest` → fresh session         |
//! | `publish_encounter_events`    | `Update / Encounter`         | Controller events → messages, `GameState`|
//! | `apply_player_motion_system`  | `Update / Motion, Playing`   | Write player velocity                    |
//! | `pause_physics`               | `OnEnter(GameOver)`          | Freeze the world                         |
//! | `resume_physics`              | `OnEnter(Playing)`           | Unfreeze after a restart                 |

use crate::collectible::{drop_star, hide_star, spawn_stars, Star};
use crate::config::{load_game_config, GameConfig};
use crate::encounter::{EncounterController, EncounterEvent};
use crate::hazard::{relaunch_bomb, spawn_bomb, Bomb, HazardPlacement};
use crate::level::{setup_physics, spawn_level, Arena};
use crate::menu::GameState;
use crate::player::{
    apply_player_motion_system, gamepad_connection_system, gamepad_to_intent_system,
    ground_contact_system, keyboard_to_intent_system, mark_player_hit,
    player_intent_clear_system, spawn_player, Facing, Player, PlayerIntent, PreferredGamepad,
};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::thread_rng;

/// Marks every entity owned by one session (player, stars, bombs). A restart
/// despawns all of them.
#[derive(Component)]
pub struct SessionEntity;

/// Ask for a fresh session. Ignored unless the current one is over.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestartRequest;

/// Per-frame ordering: read input, resolve contacts, then move the player.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Encounter,
    Motion,
}

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .init_resource::<PreferredGamepad>()
            .add_message::<EncounterEvent>()
            .add_message::<RestartRequest>()
            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Encounter,
                    GameplaySet::Motion,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (load_game_config, setup_physics, spawn_level, start_session).chain(),
            )
            .add_systems(
                Update,
                (
                    gamepad_connection_system,
                    player_intent_clear_system,
                    keyboard_to_intent_system,
                    gamepad_to_intent_system,
                )
                    .chain()
                    .in_set(GameplaySet::Input)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    ground_contact_system,
                    hazard_collision_system,
                    collectible_overlap_system,
                    handle_restart_requests,
                    publish_encounter_events,
                )
                    .chain()
                    .in_set(GameplaySet::Encounter),
            )
            .add_systems(
                Update,
                apply_player_motion_system
                    .in_set(GameplaySet::Motion)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::GameOver), pause_physics)
            .add_systems(OnEnter(GameState::Playing), resume_physics);
    }
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

/// Spawn the player plus one entity per star and per recorded bomb.
pub fn spawn_session_entities(
    commands: &mut Commands,
    arena: &Arena,
    config: &GameConfig,
    controller: &EncounterController,
) {
    spawn_player(commands, arena, config);
    spawn_stars(commands, arena, controller.field());
    for (index, hazard) in controller.hazards().iter().enumerate() {
        spawn_bomb(
            commands,
            arena,
            &HazardPlacement {
                index,
                hazard: *hazard,
                recycled: false,
            },
        );
    }
}

/// Startup: build the first session from the loaded config.
pub fn start_session(mut commands: Commands, config: Res<GameConfig>, arena: Res<Arena>) {
    let controller = EncounterController::from_config(&config, &mut thread_rng());
    spawn_session_entities(&mut commands, &arena, &config, &controller);
    info!(
        "[session] Session {} started with {} stars",
        controller.session(),
        controller.field().pool_size()
    );
    commands.insert_resource(controller);
}

/// Throw away the finished session's entities and spawn the next one.
///
/// Only the first request that actually restarts counts; later ones in the
/// same frame hit a controller that is already playing again.
pub fn handle_restart_requests(
    mut commands: Commands,
    mut requests: MessageReader<RestartRequest>,
    mut controller: ResMut<EncounterController>,
    config: Res<GameConfig>,
    arena: Res<Arena>,
    session_entities: Query<Entity, With<SessionEntity>>,
) {
    let mut restarted = false;
    for _ in requests.read() {
        restarted |= controller.restart(&mut thread_rng());
    }
    if !restarted {
        return;
    }

    for entity in session_entities.iter() {
        commands.entity(entity).despawn();
    }
    spawn_session_entities(&mut commands, &arena, &config, &controller);
}

// ── Contact handling ──────────────────────────────────────────────────────────

/// The entity on the other side of a contact with `player`, if any.
fn other_than(player: Entity, e1: Entity, e2: Entity) -> Option<Entity> {
    if e1 == player {
        Some(e2)
    } else if e2 == player {
        Some(e1)
    } else {
        None
    }
}

/// Player touched a bomb: end the session and tint the player.
pub fn hazard_collision_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut controller: ResMut<EncounterController>,
    bombs: Query<(), With<Bomb>>,
    mut players: Query<(Entity, &mut Sprite, &mut Facing), With<Player>>,
) {
    let Ok((player_entity, mut sprite, mut facing)) = players.single_mut() else {
        return;
    };

    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let Some(other) = other_than(player_entity, *e1, *e2) else {
            continue;
        };
        if !bombs.contains(other) {
            continue;
        }
        if controller.on_player_hazard_collision() {
            mark_player_hit(&mut sprite, &mut facing);
        }
    }
}

/// Player overlapped a star: collect it, refill the field when it runs dry,
/// and launch (or relaunch) a bomb.
pub fn collectible_overlap_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    mut controller: ResMut<EncounterController>,
    arena: Res<Arena>,
    players: Query<(Entity, &Transform), With<Player>>,
    stars: Query<(Entity, &Star)>,
    bombs: Query<(Entity, &Bomb)>,
) {
    let Ok((player_entity, player_transform)) = players.single() else {
        return;
    };
    let player_x = arena.to_arena(player_transform.translation.truncate()).x;
    let mut rng = thread_rng();
    // Bombs spawned this frame are not visible to `bombs` until commands flush.
    let mut launched: Vec<(usize, Entity)> = Vec::new();
    // A refill reactivates every slot, so `is_active` alone cannot reject a
    // repeated contact with the star that emptied the field.
    let mut collected: std::collections::HashSet<Entity> = Default::default();

    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let Some(other) = other_than(player_entity, *e1, *e2) else {
            continue;
        };
        let Ok((star_entity, star)) = stars.get(other) else {
            continue;
        };
        if collected.contains(&star_entity) || !controller.field().is_active(star.slot) {
            debug!("[encounter] Ignoring stale overlap with star {}", star.slot);
            continue;
        }
        let Some(outcome) = controller.on_player_collectible_overlap(star.slot, player_x, &mut rng)
        else {
            continue;
        };

        collected.insert(star_entity);
        hide_star(&mut commands, star_entity);
        if outcome.field_reset {
            for (entity, star) in stars.iter() {
                if let Some(collectible) = controller.field().get(star.slot) {
                    drop_star(&mut commands, entity, &arena, collectible);
                }
            }
            debug!("[encounter] Star field refilled");
        }

        let placement = outcome.hazard;
        if placement.recycled {
            let existing = bombs
                .iter()
                .find(|(_, bomb)| bomb.index == placement.index)
                .map(|(entity, _)| entity)
                .or_else(|| {
                    launched
                        .iter()
                        .find(|(index, _)| *index == placement.index)
                        .map(|(_, entity)| *entity)
                });
            match existing {
                Some(entity) => relaunch_bomb(&mut commands, entity, &arena, &placement.hazard),
                None => warn!("[encounter] No bomb entity for hazard {}", placement.index),
            }
        } else {
            let entity = spawn_bomb(&mut commands, &arena, &placement);
            launched.push((placement.index, entity));
        }

        debug!(
            "[encounter] Star {} collected, score {}, bomb {} at x={:.0}",
            outcome.slot, outcome.score, placement.index, placement.hazard.position.x
        );
    }
}

/// Forward the controller's queued events as messages and drive `GameState`.
pub fn publish_encounter_events(
    mut controller: ResMut<EncounterController>,
    mut writer: MessageWriter<EncounterEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !controller.has_pending_events() {
        return;
    }
    for event in controller.drain_events() {
        match event {
            EncounterEvent::GameOver { final_score } => {
                info!("[encounter] Player hit by a bomb; final score {final_score}");
                next_state.set(GameState::GameOver);
            }
            EncounterEvent::Restarted { session } => {
                info!("[session] Restarted; session {session}");
                next_state.set(GameState::Playing);
            }
            EncounterEvent::ScoreChanged { .. } => {}
        }
        writer.write(event);
    }
}

// ── Physics pause ─────────────────────────────────────────────────────────────

/// Freeze every body while the game-over overlay is up.
pub fn pause_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

pub fn resume_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_than_picks_the_opposite_entity() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();
        assert_eq!(other_than(a, a, b), Some(b));
        assert_eq!(other_than(a, b, a), Some(b));
        assert_eq!(other_than(a, b, c), None);
    }
}
