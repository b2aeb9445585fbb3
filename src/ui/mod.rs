//! UI module - level selection menu and in-game HUD.

mod hud;
mod menu;
mod plugin;

pub use plugin::UiPlugin;
