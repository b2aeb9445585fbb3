//! Level module - discovery, description parsing, and scene composition.

mod catalog;
mod composer;
mod data;
mod error;
mod plugin;
mod prefabs;
mod scene;

pub use catalog::{discover_levels, DiscoveredLevel, LevelCatalog, LEVEL_EXTENSION};
pub use composer::{compose, AssetResolver, CameraConfigOutcome, CompositionReport, SceneSink};
pub use data::{parse, parse_str, CameraSettings, LevelDescription, LevelDocument, LevelItem};
pub use error::{ComposeError, LevelLoadError};
pub use plugin::LevelPlugin;
pub use prefabs::{PrefabDef, PrefabRegistry};
pub use scene::{LevelPiece, LevelRoot, SpriteLayerName, SpriteOrder, WorldSceneSink};
