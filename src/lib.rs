//! Soy Boy Clone - a 2D platformer's content-loading and progress layer in Bevy.
//!
//! Levels are declarative JSON documents discovered from a directory,
//! deserialized and composed into a live scene; per-player best times are
//! persisted to a versioned binary store.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, menu/play flow
//! - **Level**: Level catalog, description codec, scene composition
//! - **Records**: Run time persistence and best-time queries
//! - **Session**: Selection/load/restart orchestration and player identity
//! - **Player**: Player entity and camera tracking configuration
//! - **UI**: Level selection menu and in-game times panel
//!
//! Rendering, input mapping, physics, and audio stay outside: gameplay code
//! reports a finished run with a [`core::RunCompleted`] event and reads the
//! [`player::CameraTracker`] configuration the composer fills in.

pub mod core;
pub mod level;
pub mod player;
pub mod records;
pub mod session;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SoyBoyPlugin;

impl Plugin for SoyBoyPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Level discovery, parsing, and composition resources
            .add_plugins(level::LevelPlugin)
            // Session orchestration and persistence
            .add_plugins(session::SessionPlugin)
            // Player entity and camera
            .add_plugins(player::PlayerPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
