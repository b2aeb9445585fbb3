//! Bevy-backed scene sink for the composer.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::player::CameraTracker;

use super::composer::{CameraConfigOutcome, SceneSink};
use super::data::{CameraSettings, LevelItem};
use super::prefabs::PrefabDef;

/// Marker for the container entity all level content is parented under.
/// Replaced wholesale on every (re)load.
#[derive(Component)]
pub struct LevelRoot;

/// Marker for every entity instantiated from a level item. Name lookups feeding
/// a fresh composition must exclude these: they belong to the root being
/// replaced and are about to despawn.
#[derive(Component)]
pub struct LevelPiece;

/// Rendering layer order from the level item, for the render side to consume.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteOrder(pub i32);

/// Named rendering layer from the level item.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpriteLayerName(pub String);

/// Scene sink writing into the live Bevy world via `Commands`.
///
/// Built by the loading system from queries taken at that moment. Pieces
/// spawned through the sink are recorded as they attach, so a camera target
/// naming an item from the same document resolves even though the world has
/// not applied the spawn commands yet.
pub struct WorldSceneSink<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    asset_server: &'a AssetServer,
    /// Roots from a previous composition, despawned on replace.
    existing_roots: Vec<Entity>,
    player: Option<Entity>,
    tracker: Option<Entity>,
    /// Name lookup for resolving the camera track target. Seeded from the
    /// pre-compose world (level pieces excluded); freshly attached pieces are
    /// added on top and shadow any snapshot entry with the same name.
    named: HashMap<String, Entity>,
    root: Option<Entity>,
}

impl<'a, 'w, 's> WorldSceneSink<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        asset_server: &'a AssetServer,
        existing_roots: Vec<Entity>,
        player: Option<Entity>,
        tracker: Option<Entity>,
        named: HashMap<String, Entity>,
    ) -> Self {
        Self {
            commands,
            asset_server,
            existing_roots,
            player,
            tracker,
            named,
            root: None,
        }
    }
}

impl SceneSink for WorldSceneSink<'_, '_, '_> {
    type Template = PrefabDef;

    fn replace_level_root(&mut self) {
        for entity in self.existing_roots.drain(..) {
            self.commands.entity(entity).despawn_recursive();
        }
        let root = self
            .commands
            .spawn((
                Name::new("Level"),
                LevelRoot,
                Transform::default(),
                Visibility::default(),
            ))
            .id();
        self.root = Some(root);
    }

    fn attach_item(&mut self, template: PrefabDef, item: &LevelItem) {
        let transform = Transform {
            translation: item.position,
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                item.rotation.x.to_radians(),
                item.rotation.y.to_radians(),
                item.rotation.z.to_radians(),
            ),
            scale: item.scale,
        };

        let mut entity = self.commands.spawn((
            Name::new(item.prefab_name.clone()),
            LevelPiece,
            transform,
            Visibility::default(),
        ));

        // Non-visual prefabs get a bare transform; sprite attributes only
        // apply where a sprite exists.
        if let Some(sprite_path) = &template.sprite {
            entity.insert((
                Sprite {
                    image: self.asset_server.load(sprite_path),
                    color: item.sprite_color,
                    custom_size: Some(Vec2::new(template.size.0, template.size.1)),
                    ..default()
                },
                SpriteOrder(item.sprite_order),
                SpriteLayerName(item.sprite_layer.clone()),
            ));
        }

        let piece = entity.id();
        self.named.insert(item.prefab_name.clone(), piece);
        if let Some(root) = self.root {
            self.commands.entity(root).add_child(piece);
        }
    }

    fn place_player(&mut self, position: Vec3) -> bool {
        match self.player {
            Some(player) => {
                self.commands
                    .entity(player)
                    .insert(Transform::from_translation(position));
                true
            }
            None => false,
        }
    }

    fn apply_camera_settings(&mut self, settings: &CameraSettings) -> CameraConfigOutcome {
        let Some(tracker) = self.tracker else {
            return CameraConfigOutcome::NoTracker;
        };

        let target = self.named.get(&settings.camera_track_target).copied();
        self.commands.entity(tracker).insert(CameraTracker {
            camera_z_depth: settings.camera_z_depth,
            target,
            min: Vec2::new(settings.min_x, settings.min_y),
            max: Vec2::new(settings.max_x, settings.max_y),
            tracking_speed: settings.tracking_speed,
        });

        if target.is_none() && !settings.camera_track_target.is_empty() {
            CameraConfigOutcome::TargetNotFound
        } else {
            CameraConfigOutcome::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::world::CommandQueue;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app
    }

    fn item(prefab_name: &str) -> LevelItem {
        LevelItem {
            prefab_name: prefab_name.to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            sprite_order: 0,
            sprite_layer: String::new(),
            sprite_color: Color::WHITE,
        }
    }

    fn settings(target: &str) -> CameraSettings {
        CameraSettings {
            camera_z_depth: -10.0,
            camera_track_target: target.to_string(),
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
            tracking_speed: 2.0,
        }
    }

    fn non_visual() -> PrefabDef {
        PrefabDef {
            sprite: None,
            size: (1.0, 2.0),
        }
    }

    #[test]
    fn camera_target_spawned_in_the_same_compose_resolves() {
        let mut app = test_app();
        let tracker_entity = app.world_mut().spawn(CameraTracker::default()).id();
        let asset_server = app.world().resource::<AssetServer>().clone();

        let mut queue = CommandQueue::default();
        let outcome = {
            let mut commands = Commands::new(&mut queue, app.world());
            let mut sink = WorldSceneSink::new(
                &mut commands,
                &asset_server,
                Vec::new(),
                None,
                Some(tracker_entity),
                HashMap::new(),
            );
            sink.replace_level_root();
            sink.attach_item(non_visual(), &item("goal-flag"));
            sink.apply_camera_settings(&settings("goal-flag"))
        };
        queue.apply(app.world_mut());

        assert_eq!(outcome, CameraConfigOutcome::Applied);
        let tracker = app
            .world()
            .entity(tracker_entity)
            .get::<CameraTracker>()
            .unwrap();
        let target = tracker.target.expect("target should resolve");
        let name = app.world().entity(target).get::<Name>().unwrap();
        assert_eq!(name.as_str(), "goal-flag");
        // Pieces are tagged so the next composition's name snapshot skips them.
        assert!(app.world().entity(target).get::<LevelPiece>().is_some());
    }

    #[test]
    fn fresh_pieces_shadow_snapshot_entries_with_the_same_name() {
        let mut app = test_app();
        let tracker_entity = app.world_mut().spawn(CameraTracker::default()).id();
        let stale = app.world_mut().spawn(Name::new("goal-flag")).id();
        let asset_server = app.world().resource::<AssetServer>().clone();

        let mut named = HashMap::new();
        named.insert("goal-flag".to_string(), stale);

        let mut queue = CommandQueue::default();
        {
            let mut commands = Commands::new(&mut queue, app.world());
            let mut sink = WorldSceneSink::new(
                &mut commands,
                &asset_server,
                Vec::new(),
                None,
                Some(tracker_entity),
                named,
            );
            sink.replace_level_root();
            sink.attach_item(non_visual(), &item("goal-flag"));
            sink.apply_camera_settings(&settings("goal-flag"));
        }
        queue.apply(app.world_mut());

        let tracker = app
            .world()
            .entity(tracker_entity)
            .get::<CameraTracker>()
            .unwrap();
        let target = tracker.target.expect("target should resolve");
        assert_ne!(target, stale);
    }
}
