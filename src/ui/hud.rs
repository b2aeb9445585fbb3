//! In-game HUD - best times panel and run clock.

use bevy::prelude::*;

use crate::core::GameState;
use crate::session::{BestTimesDisplay, RunClock};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the best-times panel text.
#[derive(Component)]
struct BestTimesText;

/// Marker for the running clock text.
#[derive(Component)]
struct RunClockText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_best_times_panel, update_run_clock).run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD: best times in the top-left, run clock in the top-right.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("BEST TIMES"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
                BestTimesText,
            ));
            parent.spawn((
                Text::new("0.000"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.3)),
                RunClockText,
            ));
        });
}

/// Rebuild the panel whenever a level load refreshes the best times.
fn update_best_times_panel(
    best_times: Res<BestTimesDisplay>,
    mut text_query: Query<&mut Text, With<BestTimesText>>,
) {
    if !best_times.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let mut panel = format!("{}\nBEST TIMES\n", best_times.level_id);
    for (rank, entry) in best_times.entries.iter().enumerate() {
        panel.push_str(&format!("{}. {}\n", rank + 1, entry.time));
    }
    if best_times.entries.is_empty() {
        panel.push_str("no times yet\n");
    }
    *text = Text::new(panel);
}

fn update_run_clock(
    run_clock: Res<RunClock>,
    mut text_query: Query<&mut Text, With<RunClockText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    *text = Text::new(run_clock.current().to_string());
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
