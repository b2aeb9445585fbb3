//! Level description documents and JSON parsing.
//!
//! A level is a declarative JSON document: an ordered list of prefab placements,
//! a player start position, and camera tracking settings. The document types
//! mirror the file contract exactly (camelCase fields, `{x, y, z}` vectors,
//! normalized `{r, g, b, a}` colors); the typed `LevelDescription` is produced
//! from them by an explicit conversion, field by field.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::LevelLoadError;

// === Document types (on-disk JSON shape) ===

/// Raw level description as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    #[serde(default)]
    pub level_items: Vec<LevelItemDoc>,
    /// Required; checked during conversion so the error can name the field.
    pub player_start_position: Option<PointDoc>,
    /// Required; checked during conversion so the error can name the field.
    pub camera_settings: Option<CameraSettingsDoc>,
}

/// One prefab placement in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelItemDoc {
    /// Identifier into the prefab registry. An empty or unknown name skips
    /// this item only, it does not fail the level.
    #[serde(default)]
    pub prefab_name: String,
    #[serde(default)]
    pub position: PointDoc,
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: PointDoc,
    #[serde(default = "PointDoc::one")]
    pub scale: PointDoc,
    #[serde(default)]
    pub sprite_order: i32,
    #[serde(default)]
    pub sprite_layer: String,
    #[serde(default = "ColorDoc::white")]
    pub sprite_color: ColorDoc,
}

/// Camera tracking settings block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettingsDoc {
    #[serde(default)]
    pub camera_z_depth: f32,
    #[serde(default)]
    pub camera_track_target: String,
    #[serde(default)]
    pub min_x: f32,
    #[serde(default)]
    pub max_x: f32,
    #[serde(default)]
    pub min_y: f32,
    #[serde(default)]
    pub max_y: f32,
    #[serde(default)]
    pub tracking_speed: f32,
}

/// A 3D point or vector in the document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointDoc {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl PointDoc {
    fn one() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

/// RGBA color with channels normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorDoc {
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub g: f32,
    #[serde(default)]
    pub b: f32,
    #[serde(default)]
    pub a: f32,
}

impl ColorDoc {
    fn white() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

// === Typed description ===

/// A parsed level description, immutable once produced.
#[derive(Debug, Clone)]
pub struct LevelDescription {
    /// Placements in document order. Order determines instantiation order only.
    pub items: Vec<LevelItem>,
    pub player_start_position: Vec3,
    pub camera: CameraSettings,
}

/// One prefab placement with transform and visual attributes.
#[derive(Debug, Clone)]
pub struct LevelItem {
    pub prefab_name: String,
    pub position: Vec3,
    /// Euler angles in degrees, applied XYZ.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub sprite_order: i32,
    pub sprite_layer: String,
    pub sprite_color: Color,
}

/// Camera tracking configuration carried by the level.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub camera_z_depth: f32,
    /// Name of the scene entity the camera should follow.
    pub camera_track_target: String,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub tracking_speed: f32,
}

/// Parse a level description file.
pub fn parse(path: &Path) -> Result<LevelDescription, LevelLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| LevelLoadError::Read {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    parse_str(&contents, &path.display().to_string())
}

/// Parse a level description from document text. Unknown fields are ignored.
pub fn parse_str(contents: &str, source: &str) -> Result<LevelDescription, LevelLoadError> {
    let doc: LevelDocument =
        serde_json::from_str(contents).map_err(|e| LevelLoadError::Malformed {
            path: source.to_string(),
            details: e.to_string(),
        })?;
    LevelDescription::from_document(doc)
}

impl LevelDescription {
    /// Convert the raw document into the typed description.
    ///
    /// Required fields are checked here, and color channels are clamped to
    /// [0, 1] rather than rejected.
    pub fn from_document(doc: LevelDocument) -> Result<Self, LevelLoadError> {
        let start = doc
            .player_start_position
            .ok_or(LevelLoadError::MissingField {
                field: "playerStartPosition",
            })?;
        let camera = doc.camera_settings.ok_or(LevelLoadError::MissingField {
            field: "cameraSettings",
        })?;

        let items = doc
            .level_items
            .into_iter()
            .map(|item| LevelItem {
                prefab_name: item.prefab_name,
                position: to_vec3(item.position),
                rotation: to_vec3(item.rotation),
                scale: to_vec3(item.scale),
                sprite_order: item.sprite_order,
                sprite_layer: item.sprite_layer,
                sprite_color: to_color(item.sprite_color),
            })
            .collect();

        Ok(Self {
            items,
            player_start_position: to_vec3(start),
            camera: CameraSettings {
                camera_z_depth: camera.camera_z_depth,
                camera_track_target: camera.camera_track_target,
                min_x: camera.min_x,
                max_x: camera.max_x,
                min_y: camera.min_y,
                max_y: camera.max_y,
                tracking_speed: camera.tracking_speed,
            },
        })
    }
}

fn to_vec3(p: PointDoc) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

fn to_color(c: ColorDoc) -> Color {
    Color::srgba(
        c.r.clamp(0.0, 1.0),
        c.g.clamp(0.0, 1.0),
        c.b.clamp(0.0, 1.0),
        c.a.clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LEVEL: &str = r#"{
        "levelItems": [
            {
                "prefabName": "grass-block",
                "position": { "x": 1.0, "y": 2.0, "z": 0.0 },
                "rotation": { "x": 0.0, "y": 0.0, "z": 90.0 },
                "scale": { "x": 2.0, "y": 1.0, "z": 1.0 },
                "spriteOrder": 3,
                "spriteLayer": "Platforms",
                "spriteColor": { "r": 1.0, "g": 0.5, "b": 0.25, "a": 1.0 }
            },
            {
                "prefabName": "checkpoint",
                "position": { "x": 5.0, "y": 0.0, "z": 0.0 }
            }
        ],
        "playerStartPosition": { "x": -4.0, "y": 1.5, "z": 0.0 },
        "cameraSettings": {
            "cameraZDepth": -10.0,
            "cameraTrackTarget": "Player",
            "minX": -5.0,
            "maxX": 40.0,
            "minY": 0.0,
            "maxY": 12.0,
            "trackingSpeed": 2.5
        }
    }"#;

    #[test]
    fn parses_a_valid_document() {
        let level = parse_str(VALID_LEVEL, "test").unwrap();
        assert_eq!(level.items.len(), 2);
        assert_eq!(level.items[0].prefab_name, "grass-block");
        assert_eq!(level.items[0].sprite_order, 3);
        assert_eq!(level.items[0].sprite_layer, "Platforms");
        assert_eq!(level.items[0].rotation, Vec3::new(0.0, 0.0, 90.0));
        assert_eq!(level.player_start_position, Vec3::new(-4.0, 1.5, 0.0));
        assert_eq!(level.camera.camera_track_target, "Player");
        assert_eq!(level.camera.tracking_speed, 2.5);
    }

    #[test]
    fn item_defaults_fill_omitted_fields() {
        let level = parse_str(VALID_LEVEL, "test").unwrap();
        let checkpoint = &level.items[1];
        assert_eq!(checkpoint.scale, Vec3::ONE);
        assert_eq!(checkpoint.sprite_order, 0);
        assert_eq!(checkpoint.sprite_color, Color::srgba(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn item_order_follows_the_document() {
        let level = parse_str(VALID_LEVEL, "test").unwrap();
        let names: Vec<_> = level.items.iter().map(|i| i.prefab_name.as_str()).collect();
        assert_eq!(names, vec!["grass-block", "checkpoint"]);
    }

    #[test]
    fn rejects_structurally_invalid_documents() {
        let result = parse_str("not json at all", "test");
        assert!(matches!(result, Err(LevelLoadError::Malformed { .. })));
    }

    #[test]
    fn missing_start_position_names_the_field() {
        let doc = r#"{ "levelItems": [], "cameraSettings": { "cameraTrackTarget": "Player" } }"#;
        match parse_str(doc, "test") {
            Err(LevelLoadError::MissingField { field }) => {
                assert_eq!(field, "playerStartPosition")
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn missing_camera_settings_names_the_field() {
        let doc = r#"{ "playerStartPosition": { "x": 0.0, "y": 0.0, "z": 0.0 } }"#;
        match parse_str(doc, "test") {
            Err(LevelLoadError::MissingField { field }) => assert_eq!(field, "cameraSettings"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let doc = r#"{
            "editorVersion": "2.4",
            "playerStartPosition": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 9.0 },
            "cameraSettings": { "cameraTrackTarget": "Player", "futureKnob": true }
        }"#;
        assert!(parse_str(doc, "test").is_ok());
    }

    #[test]
    fn color_channels_are_clamped_not_rejected() {
        let doc = r#"{
            "levelItems": [{
                "prefabName": "grass-block",
                "spriteColor": { "r": 2.0, "g": -1.0, "b": 0.5, "a": 1.5 }
            }],
            "playerStartPosition": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "cameraSettings": { "cameraTrackTarget": "Player" }
        }"#;
        let level = parse_str(doc, "test").unwrap();
        assert_eq!(
            level.items[0].sprite_color,
            Color::srgba(1.0, 0.0, 0.5, 1.0)
        );
    }

    #[test]
    fn duplicate_prefab_names_are_independent_instances() {
        let doc = r#"{
            "levelItems": [
                { "prefabName": "grass-block", "position": { "x": 0.0, "y": 0.0, "z": 0.0 } },
                { "prefabName": "grass-block", "position": { "x": 1.0, "y": 0.0, "z": 0.0 } }
            ],
            "playerStartPosition": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "cameraSettings": { "cameraTrackTarget": "Player" }
        }"#;
        let level = parse_str(doc, "test").unwrap();
        assert_eq!(level.items.len(), 2);
        assert_ne!(level.items[0].position, level.items[1].position);
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc: LevelDocument = serde_json::from_str(VALID_LEVEL).unwrap();
        let serialized = serde_json::to_string(&doc).unwrap();
        let reparsed: LevelDocument = serde_json::from_str(&serialized).unwrap();
        assert_eq!(doc, reparsed);
    }
}
