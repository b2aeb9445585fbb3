//! Level plugin - prefab registry and catalog resources.

use bevy::prelude::*;

use crate::core::GameState;

use super::catalog::LevelCatalog;
use super::prefabs::load_prefab_registry;
use super::scene::LevelRoot;

/// Level plugin - owns level discovery data and the prefab registry.
///
/// Parsing and composing a selected level is driven by the session layer;
/// this plugin only provides the resources those steps read and tears the
/// composed content down when the play scene closes.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelCatalog>()
            .add_systems(Startup, load_prefab_registry)
            .add_systems(OnExit(GameState::InGame), despawn_level_content);
    }
}

fn despawn_level_content(mut commands: Commands, roots: Query<Entity, With<LevelRoot>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
