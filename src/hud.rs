//! Heads-up display: score label top-left, play clock top-right.
//!
//! Both labels are plain UI text nodes refreshed from messages and change
//! detection, never rebuilt every frame.

use crate::clock::{format_clock, reset_clock_on_restart, tick_play_clock, PlayClock};
use crate::config::{load_game_config, GameConfig};
use crate::encounter::{EncounterController, EncounterEvent};
use crate::gameplay::GameplaySet;
use crate::menu::GameState;
use crate::score::format_score;
use bevy::prelude::*;

/// Parent node of the score label.
#[derive(Component)]
pub struct HudScoreDisplay;

/// Parent node of the clock label.
#[derive(Component)]
pub struct HudClockDisplay;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayClock>()
            // The font size comes from the loaded config.
            .add_systems(Startup, setup_hud.after(load_game_config))
            .add_systems(
                Update,
                tick_play_clock
                    .before(GameplaySet::Encounter)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    hud_score_display_system,
                    reset_clock_on_restart,
                    hud_clock_display_system,
                )
                    .chain()
                    .after(GameplaySet::Encounter),
            );
    }
}

fn clock_color() -> Color {
    Color::srgb(0.10, 0.10, 0.16)
}

/// Startup: spawn both HUD labels.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                ..default()
            },
            HudScoreDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format_score(0)),
                TextFont {
                    font_size: config.score_font_size,
                    ..default()
                },
                TextColor(Color::BLACK),
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                ..default()
            },
            HudClockDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format_clock(0)),
                TextFont {
                    font_size: config.score_font_size * 0.75,
                    ..default()
                },
                TextColor(clock_color()),
            ));
        });
}

/// Refresh the score label whenever the score changes or a session restarts.
pub fn hud_score_display_system(
    mut events: MessageReader<EncounterEvent>,
    controller: Res<EncounterController>,
    parent_query: Query<&Children, With<HudScoreDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let refresh = events.read().any(|event| {
        matches!(
            event,
            EncounterEvent::ScoreChanged { .. } | EncounterEvent::Restarted { .. }
        )
    });
    if !refresh {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(controller.score().label());
            }
        }
    }
}

pub fn hud_clock_display_system(
    clock: Res<PlayClock>,
    parent_query: Query<&Children, With<HudClockDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !clock.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format_clock(clock.elapsed_secs()));
            }
        }
    }
}
