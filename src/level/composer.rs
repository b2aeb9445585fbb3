//! Scene composition from a parsed level description.
//!
//! The algorithm is written against two seams, an asset resolver and a scene
//! sink, so it can run and be tested without a live rendering host. The Bevy
//! implementations of both live in `scene.rs` and `prefabs.rs`.

use bevy::prelude::*;

use super::data::{CameraSettings, LevelDescription, LevelItem};
use super::error::ComposeError;

/// Maps a prefab name to an instantiable template. Returns `None` for an
/// unknown name, never fails.
pub trait AssetResolver {
    type Template;

    fn resolve(&self, prefab_name: &str) -> Option<Self::Template>;
}

/// Outcome of pushing camera settings into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraConfigOutcome {
    /// Settings applied, track target resolved.
    Applied,
    /// The scene has no camera-tracking component; tolerated.
    NoTracker,
    /// The named track target does not exist; settings applied without one.
    TargetNotFound,
}

/// The scene side of composition: entity creation, transforms, name lookup.
pub trait SceneSink {
    type Template;

    /// Remove any previously composed level root and create a fresh one.
    /// Composing twice in a row must leave exactly one root active.
    fn replace_level_root(&mut self);

    /// Instantiate a resolved template under the level root and apply the
    /// item's transform and visual attributes. Items without visual attributes
    /// simply ignore the sprite fields.
    fn attach_item(&mut self, template: Self::Template, item: &LevelItem);

    /// Move the player entity to the level start. Returns false when the scene
    /// has no player entity.
    fn place_player(&mut self, position: Vec3) -> bool;

    /// Push camera tracking settings into the scene's tracking component.
    fn apply_camera_settings(&mut self, settings: &CameraSettings) -> CameraConfigOutcome;
}

/// What composition produced, for logging and UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionReport {
    /// Items instantiated under the level root.
    pub instantiated: usize,
    /// Items skipped because their prefab name did not resolve.
    pub unresolved_assets: usize,
    pub player_placed: bool,
    /// The camera track target was named but absent from the scene.
    pub camera_target_missing: bool,
}

/// Compose a parsed level into the scene.
///
/// Replaces the previous level root, instantiates every item in document
/// order (skipping unresolvable prefabs), places the player, and configures
/// camera tracking. Only a missing player entity is fatal.
pub fn compose<R, S>(
    description: &LevelDescription,
    resolver: &R,
    sink: &mut S,
) -> Result<CompositionReport, ComposeError>
where
    R: AssetResolver,
    S: SceneSink<Template = R::Template>,
{
    sink.replace_level_root();

    let mut report = CompositionReport::default();
    for item in &description.items {
        match resolver.resolve(&item.prefab_name) {
            Some(template) => {
                sink.attach_item(template, item);
                report.instantiated += 1;
            }
            None => {
                warn!("Cannot resolve prefab '{}', skipping item", item.prefab_name);
                report.unresolved_assets += 1;
            }
        }
    }

    if !sink.place_player(description.player_start_position) {
        return Err(ComposeError::PlayerEntityNotFound);
    }
    report.player_placed = true;

    match sink.apply_camera_settings(&description.camera) {
        CameraConfigOutcome::Applied | CameraConfigOutcome::NoTracker => {}
        CameraConfigOutcome::TargetNotFound => {
            warn!(
                "Camera track target '{}' not found in scene",
                description.camera.camera_track_target
            );
            report.camera_target_missing = true;
        }
    }

    Ok(report)
}
