//! Level discovery - enumerates level description files in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use super::error::LevelLoadError;

/// Extension of level description files.
pub const LEVEL_EXTENSION: &str = "json";

/// One discoverable level. The id is the file stem and doubles as the display
/// label and the stable key for time records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLevel {
    pub id: String,
    pub path: PathBuf,
}

/// Resource holding the currently known set of levels.
#[derive(Resource, Debug, Default)]
pub struct LevelCatalog {
    pub levels: Vec<DiscoveredLevel>,
}

impl LevelCatalog {
    /// Look up a discovered level by its stable id.
    pub fn get(&self, id: &str) -> Option<&DiscoveredLevel> {
        self.levels.iter().find(|level| level.id == id)
    }

    /// Replace the known level set with a fresh directory scan.
    pub fn refresh(&mut self, dir: &Path) -> Result<(), LevelLoadError> {
        self.levels = discover_levels(dir)?;
        Ok(())
    }
}

/// List level description files in `dir`, in filesystem enumeration order.
///
/// The order is whatever the OS returns; callers wanting alphabetical display
/// must sort explicitly. An empty directory yields an empty list; a directory
/// that cannot be read is a `CatalogAccess` error.
pub fn discover_levels(dir: &Path) -> Result<Vec<DiscoveredLevel>, LevelLoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LevelLoadError::CatalogAccess {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut levels = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION) {
            if let Some(stem) = path.file_stem() {
                levels.push(DiscoveredLevel {
                    id: stem.to_string_lossy().into_owned(),
                    path,
                });
            }
        }
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_only_level_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("level1.json"), "{}").unwrap();
        fs::write(dir.path().join("level2.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let mut levels = discover_levels(dir.path()).unwrap();
        levels.sort_by(|a, b| a.id.cmp(&b.id));

        let ids: Vec<_> = levels.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["level1", "level2"]);
    }

    #[test]
    fn ids_are_file_stems_without_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tutorial.json"), "{}").unwrap();

        let levels = discover_levels(dir.path()).unwrap();
        assert_eq!(levels[0].id, "tutorial");
        assert!(levels[0].path.ends_with("tutorial.json"));
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(discover_levels(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn unreadable_directory_is_a_catalog_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = discover_levels(&missing);
        assert!(matches!(
            result,
            Err(LevelLoadError::CatalogAccess { .. })
        ));
    }

    #[test]
    fn refresh_replaces_previous_scan() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("level1.json"), "{}").unwrap();

        let mut catalog = LevelCatalog::default();
        catalog.refresh(dir.path()).unwrap();
        assert_eq!(catalog.levels.len(), 1);
        assert!(catalog.get("level1").is_some());

        fs::write(dir.path().join("level2.json"), "{}").unwrap();
        catalog.refresh(dir.path()).unwrap();
        assert_eq!(catalog.levels.len(), 2);
    }
}
