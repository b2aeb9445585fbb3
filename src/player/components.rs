//! Player entity components.

use bevy::prelude::*;

/// Scene name of the player entity. Level descriptions reference it as the
/// camera track target.
pub const PLAYER_ENTITY_NAME: &str = "Player";

/// Marker component for the player-controlled entity.
#[derive(Component)]
pub struct Player;

/// Spawn the player entity. Movement and collision are wired elsewhere; this
/// layer only needs an entity to place at the level start position.
pub fn spawn_player(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Player,
            Name::new(PLAYER_ENTITY_NAME),
            Sprite::from_color(Color::srgb(0.9, 0.8, 0.3), Vec2::new(0.8, 1.2)),
            Transform::default(),
        ))
        .id()
}
