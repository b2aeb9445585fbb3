//! Prefab registry - maps prefab names to instantiable sprite templates.

use std::collections::HashMap;
use std::fs;

use bevy::prelude::*;
use serde::Deserialize;

use super::composer::AssetResolver;

/// Definition of one prefab in the registry file.
///
/// `sprite: None` marks a non-visual prefab (trigger volumes and the like);
/// those are instantiated with a transform only.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefabDef {
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default = "default_size")]
    pub size: (f32, f32),
}

fn default_size() -> (f32, f32) {
    (1.0, 1.0)
}

/// On-disk shape of `assets/data/prefabs.ron`.
#[derive(Debug, Clone, Deserialize)]
struct PrefabFile {
    prefabs: HashMap<String, PrefabDef>,
}

/// Resource storing all known prefab templates.
#[derive(Resource, Debug, Default)]
pub struct PrefabRegistry {
    entries: HashMap<String, PrefabDef>,
}

impl PrefabRegistry {
    pub fn insert(&mut self, name: impl Into<String>, def: PrefabDef) {
        self.entries.insert(name.into(), def);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the registry from a RON file. A missing or unparsable file leaves
    /// the registry empty; every level item would then be skipped with a
    /// warning, which is noisy but not fatal.
    pub fn load(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str::<PrefabFile>(&contents) {
                Ok(file) => {
                    let registry = Self {
                        entries: file.prefabs,
                    };
                    info!("Loaded {} prefab(s) from {}", registry.len(), path);
                    registry
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Prefab registry is empty.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Prefab registry is empty.", path, e);
                Self::default()
            }
        }
    }
}

impl AssetResolver for PrefabRegistry {
    type Template = PrefabDef;

    fn resolve(&self, prefab_name: &str) -> Option<PrefabDef> {
        self.entries.get(prefab_name).cloned()
    }
}

/// System to load the prefab registry at startup.
pub fn load_prefab_registry(mut commands: Commands) {
    commands.insert_resource(PrefabRegistry::load("assets/data/prefabs.ron"));
}
