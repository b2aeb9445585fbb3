//! Global events used for cross-system communication.
//!
//! Events keep the decision-making session controller separate from the
//! systems that produce inputs (UI clicks, goal triggers) and the systems
//! that execute effects (scene loads, record writes).

use bevy::prelude::*;

use crate::records::RunTime;

/// Sent by the menu when a level button is clicked.
#[derive(Event, Debug, Clone)]
pub struct SelectLevelRequest {
    /// Stable catalog identifier of the chosen level.
    pub id: String,
}

/// Sent when the player finishes a run (goal reached).
///
/// Goal collision detection lives outside this layer; whoever detects the
/// finish stamps the run clock and sends this.
#[derive(Event, Debug, Clone, Copy)]
pub struct RunCompleted {
    pub time: RunTime,
}

/// Request to (re)build the selected level's content in the play scene.
///
/// Emitted when the play scene opens and again when a delayed restart fires,
/// so a restart reloads content without bouncing through another state.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadLevelContent;
