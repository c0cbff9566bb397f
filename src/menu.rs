//! `GameState` definition and `MenuPlugin` (game-over overlay).
//!
//! ## States
//!
//! | State      | Description                                         |
//! |------------|-----------------------------------------------------|
//! | `Playing`  | Initial state; input and physics active             |
//! | `GameOver` | Physics frozen; game-over overlay shown             |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                    | Schedule                  | Purpose                        |
//! |---------------------------|---------------------------|--------------------------------|
//! | `setup_game_over`         | `OnEnter(GameOver)`       | Spawn the overlay              |
//! | `cleanup_game_over`       | `OnExit(GameOver)`        | Despawn the overlay            |
//! | `game_over_button_system` | `Update / in GameOver`    | Play Again / Quit handling     |

use bevy::prelude::*;

mod game_over;

pub use game_over::{cleanup_game_over, game_over_button_system, setup_game_over};

/// Top-level application state machine, mirroring the encounter phase.
///
/// Transitions are requested by [`crate::gameplay::publish_encounter_events`];
/// nothing else writes `NextState<GameState>`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button.
#[derive(Component)]
pub struct GameOverPlayAgainButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and the game-over overlay.
///
/// Add it before any plugin that uses `in_state(GameState::..)`.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                game_over_button_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn play_again_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn play_again_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn play_again_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn subtitle_color() -> Color {
    Color::srgb(0.75, 0.75, 0.82)
}
fn hint_color() -> Color {
    Color::srgb(0.45, 0.45, 0.52)
}

/// Fixed-height gap inside a flex column.
fn spacer(parent: &mut bevy::ecs::hierarchy::ChildSpawnerCommands, height: f32) {
    parent.spawn(Node {
        height: Val::Px(height),
        ..default()
    });
}
