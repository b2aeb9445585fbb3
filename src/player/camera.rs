//! Camera tracking configuration.
//!
//! Levels carry the bounds, target and speed for camera tracking; the follow
//! interpolation itself is a separate concern and reads this component.

use bevy::prelude::*;

/// Marker for the in-game camera.
#[derive(Component)]
pub struct GameCamera;

/// Tracking configuration, populated by the scene composer from the level's
/// camera settings.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CameraTracker {
    pub camera_z_depth: f32,
    /// Entity the camera should follow, if the named target resolved.
    pub target: Option<Entity>,
    /// Lower-left corner of the tracking bounds.
    pub min: Vec2,
    /// Upper-right corner of the tracking bounds.
    pub max: Vec2,
    pub tracking_speed: f32,
}

impl Default for CameraTracker {
    fn default() -> Self {
        Self {
            camera_z_depth: -10.0,
            target: None,
            min: Vec2::NEG_INFINITY,
            max: Vec2::INFINITY,
            tracking_speed: 1.0,
        }
    }
}

/// Spawn the in-game camera with an unconfigured tracker.
pub fn spawn_game_camera(commands: &mut Commands) -> Entity {
    commands
        .spawn((Camera2d, GameCamera, CameraTracker::default()))
        .id()
}
