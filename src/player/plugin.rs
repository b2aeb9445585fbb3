//! Player plugin - spawns the player and game camera for the play scene.

use bevy::prelude::*;

use crate::core::GameState;

use super::camera::{spawn_game_camera, GameCamera};
use super::components::{spawn_player, Player};

/// Player plugin - owns the play-scene player entity and camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), spawn_play_entities)
            .add_systems(OnExit(GameState::InGame), cleanup_play_entities);
    }
}

/// Spawn the player and camera when the play scene opens. The scene composer
/// positions both once the level content loads.
fn spawn_play_entities(mut commands: Commands) {
    spawn_player(&mut commands);
    spawn_game_camera(&mut commands);
}

fn cleanup_play_entities(
    mut commands: Commands,
    player_query: Query<Entity, With<Player>>,
    camera_query: Query<Entity, With<GameCamera>>,
) {
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
