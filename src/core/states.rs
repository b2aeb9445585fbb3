//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time: the menu scene lists
//! discovered levels, the play scene holds the composed level content.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files and the player profile load
/// - Move to `Menu` for level selection
/// - Enter `InGame` when a level was selected; Escape returns to `Menu`
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading registries and saved profile
    #[default]
    Loading,
    /// Level selection menu
    Menu,
    /// Active play scene with composed level content
    InGame,
}
