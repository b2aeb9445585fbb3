//! Player module - player entity and camera tracking configuration.

mod camera;
mod components;
mod plugin;

pub use camera::{spawn_game_camera, CameraTracker, GameCamera};
pub use components::{spawn_player, Player, PLAYER_ENTITY_NAME};
pub use plugin::PlayerPlugin;
