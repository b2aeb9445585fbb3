//! Content paths loaded from an external RON file.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::Deserialize;

/// Where level descriptions and saved data live. Loaded from
/// `assets/data/content.ron`; missing file or fields fall back to defaults.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub levels_dir: PathBuf,
    pub saves_dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("assets/levels"),
            saves_dir: PathBuf::from("saves"),
        }
    }
}

impl ContentConfig {
    /// Load content config from the RON file.
    pub fn load() -> Self {
        let path = "assets/data/content.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded content config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Path of the saved player profile.
    pub fn profile_path(&self) -> PathBuf {
        self.saves_dir.join("profile.ron")
    }
}
