use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use star_catcher::config::GameConfig;
use star_catcher::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use star_catcher::gameplay::GameplayPlugin;
use star_catcher::hud::HudPlugin;
use star_catcher::level::sky_color;
use star_catcher::menu::MenuPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Star Catcher".into(),
                resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(sky_color()))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // One physics unit per pixel, so speeds and gravity read in px/s.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        // MenuPlugin registers GameState; it must come first.
        .add_plugins((MenuPlugin, GameplayPlugin, HudPlugin))
        .run();
}
