//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            // Register global events
            .add_event::<SelectLevelRequest>()
            .add_event::<RunCompleted>()
            .add_event::<LoadLevelContent>()
            // Loading state - session startup systems run here, then we
            // move straight to the menu
            .add_systems(OnEnter(GameState::Loading), transition_to_menu)
            // Escape leaves the play scene back to the menu
            .add_systems(
                Update,
                handle_escape_to_menu.run_if(in_state(GameState::InGame)),
            );
    }
}

/// Immediately transition from Loading to the menu. Registry and profile
/// loading happen in Startup systems, which run before the first transition.
fn transition_to_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Menu);
}

/// Handle Escape key to abandon the current run and return to the menu.
fn handle_escape_to_menu(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Menu);
    }
}
