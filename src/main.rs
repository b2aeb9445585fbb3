//! Soy Boy Clone - Entry Point
//!
//! A 2D platformer shell around the content-loading and best-times layer.
//!
//! Controls:
//! - Click a level button to play it
//! - Type in the menu to change the player name
//! - Enter: finish the current run (goal stand-in)
//! - Escape: back to the menu

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Soy Boy Clone".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Our game plugin
        .add_plugins(soyboy_clone::SoyBoyPlugin)
        .run();
}
