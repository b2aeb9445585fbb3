//! Player identity persistence.
//!
//! The chosen display name is read once at session start and written back on
//! every change, so it survives restarts of the process.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The player's chosen display name. Doubles as half of the time-record key,
/// so renaming starts a fresh history.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "player".to_string(),
        }
    }
}

impl PlayerProfile {
    /// Load the saved profile, or the default for a first run.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(profile) => profile,
                Err(e) => {
                    warn!("Could not parse profile {:?}: {}. Using default.", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write the profile back. Failures are logged; losing a name change is
    /// not worth interrupting the session for.
    pub fn save(&self, path: &Path) {
        let contents = match ron::to_string(self) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Could not serialize profile: {}", e);
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Could not create saves directory {:?}: {}", parent, e);
                return;
            }
        }
        if let Err(e) = fs::write(path, contents) {
            error!("Could not write profile {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_profile_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let profile = PlayerProfile::load(&dir.path().join("profile.ron"));
        assert_eq!(profile, PlayerProfile::default());
    }

    #[test]
    fn profile_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.ron");

        let profile = PlayerProfile {
            name: "alice".to_string(),
        };
        profile.save(&path);

        assert_eq!(PlayerProfile::load(&path), profile);
    }
}
