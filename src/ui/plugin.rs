//! UI plugin - menu and in-game interface elements.

use bevy::prelude::*;

use super::{hud, menu};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        menu::setup_menu_systems(app);
        hud::setup_hud_systems(app);
    }
}
