//! Persistent per-player, per-level time records.
//!
//! One record file per (player, level) pair. The whole entry list is rewritten
//! on every append; there is no file locking, so concurrent processes touching
//! the same record file can lose an append. A single active session is assumed.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time::RunTime;

/// Current on-disk schema version. Bump when `PlayerTimeEntry` changes shape.
const STORE_VERSION: u16 = 1;

/// One completed run, stamped with the wall-clock date it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTimeEntry {
    /// Unix timestamp (seconds) of when the run was saved.
    pub entry_date: u64,
    pub time: RunTime,
}

/// On-disk shape of a record file.
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    version: u16,
    entries: Vec<PlayerTimeEntry>,
}

/// Errors from the record store. Read failures are swallowed by `load` (missing
/// history is not an error); write failures must reach the caller.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Failed to write record file '{path}': {details}")]
    Write { path: String, details: String },

    #[error("Failed to encode record file '{path}': {details}")]
    Encode { path: String, details: String },
}

/// Store reading and writing record files under a saves directory.
#[derive(Resource, Debug, Clone)]
pub struct TimeRecordStore {
    saves_dir: PathBuf,
}

impl TimeRecordStore {
    pub fn new(saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            saves_dir: saves_dir.into(),
        }
    }

    /// Record file path for a (player, level) key.
    ///
    /// The level id must be the catalog's stable identifier, never a
    /// display-decorated variant, or history fragments silently.
    pub fn record_path(&self, player: &str, level_id: &str) -> PathBuf {
        self.saves_dir.join(format!(
            "{}_{}_times.dat",
            sanitize(player),
            sanitize(level_id)
        ))
    }

    /// Load all recorded times for a (player, level) key, oldest first.
    ///
    /// A missing, unreadable or unrecognized file is a first run, not an error.
    pub fn load(&self, player: &str, level_id: &str) -> Vec<PlayerTimeEntry> {
        let path = self.record_path(player, level_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };

        let config = bincode::config::standard();
        match bincode::serde::decode_from_slice::<RecordFile, _>(&bytes, config) {
            Ok((file, _)) if file.version == STORE_VERSION => file.entries,
            Ok((file, _)) => {
                warn!(
                    "Record file {:?} has unknown version {}, treating as empty history",
                    path, file.version
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Could not decode record file {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Append one run time for a (player, level) key, stamped with the current
    /// date, rewriting the whole record file.
    pub fn append(
        &self,
        player: &str,
        level_id: &str,
        time: RunTime,
    ) -> Result<(), RecordStoreError> {
        let mut entries = self.load(player, level_id);
        entries.push(PlayerTimeEntry {
            entry_date: unix_now(),
            time,
        });

        let path = self.record_path(player, level_id);
        let file = RecordFile {
            version: STORE_VERSION,
            entries,
        };
        let bytes = bincode::serde::encode_to_vec(&file, bincode::config::standard()).map_err(
            |e| RecordStoreError::Encode {
                path: path.display().to_string(),
                details: e.to_string(),
            },
        )?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RecordStoreError::Write {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;
        }
        fs::write(&path, bytes).map_err(|e| RecordStoreError::Write {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }
}

/// The `n` fastest entries, ascending by time. The sort is stable: equal times
/// keep their original (insertion) order.
pub fn best_n(entries: &[PlayerTimeEntry], n: usize) -> Vec<PlayerTimeEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.time);
    sorted.truncate(n);
    sorted
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Keep record keys filesystem-safe. Deterministic, so a given (player, level)
/// pair always maps to the same file.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
