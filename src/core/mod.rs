//! Core module - game states, global events, and flow systems.

mod events;
mod plugin;
mod states;

pub use events::{LoadLevelContent, RunCompleted, SelectLevelRequest};
pub use plugin::CorePlugin;
pub use states::GameState;
