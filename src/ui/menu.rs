//! Level selection menu with player name entry.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::core::{GameState, SelectLevelRequest};
use crate::level::LevelCatalog;
use crate::session::PlayerProfile;

const NAME_MAX_LEN: usize = 24;

/// Marker for menu UI entities.
#[derive(Component)]
struct MenuUi;

/// Marker for the menu camera.
#[derive(Component)]
struct MenuCamera;

/// Marker for the container the level buttons are (re)built under.
#[derive(Component)]
struct LevelList;

/// A clickable level entry carrying the discovered level id. The click
/// handler looks the id up from this component; buttons share one handler
/// instead of each capturing its own callback.
#[derive(Component)]
struct LevelButton {
    id: String,
}

/// Marker for the text showing the current player name.
#[derive(Component)]
struct NameValueText;

/// Setup menu systems.
pub fn setup_menu_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::Menu), spawn_menu)
        .add_systems(
            Update,
            (
                populate_level_buttons,
                level_button_input,
                player_name_input,
                update_name_text,
            )
                .run_if(in_state(GameState::Menu)),
        )
        .add_systems(OnExit(GameState::Menu), cleanup_menu);
}

/// Spawn the menu scaffolding. Level buttons are populated separately once
/// the refreshed catalog is available.
fn spawn_menu(mut commands: Commands, profile: Res<PlayerProfile>) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.07, 0.09, 0.12)),
            MenuUi,
        ))
        .with_children(|parent| {
            // Title
            parent.spawn((
                Text::new("SOY BOY"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.3)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            // Player name row (type to edit)
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(8.0),
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new("Player:"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.6, 0.65)),
                    ));
                    row.spawn((
                        Text::new(profile.name.clone()),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.95)),
                        NameValueText,
                    ));
                });

            // Discovered levels get buttons under this container.
            parent.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(8.0),
                    ..default()
                },
                LevelList,
            ));
        });
}

/// Rebuild the level button list whenever the catalog changes.
fn populate_level_buttons(
    mut commands: Commands,
    catalog: Res<LevelCatalog>,
    list_query: Query<Entity, With<LevelList>>,
    button_query: Query<Entity, With<LevelButton>>,
) {
    if !catalog.is_changed() {
        return;
    }
    let Ok(list) = list_query.get_single() else {
        return;
    };

    for entity in button_query.iter() {
        commands.entity(entity).despawn_recursive();
    }

    for level in &catalog.levels {
        let button = commands
            .spawn((
                Button,
                Node {
                    width: Val::Px(260.0),
                    height: Val::Px(46.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::srgb(0.15, 0.17, 0.22)),
                LevelButton {
                    id: level.id.clone(),
                },
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new(level.id.clone()),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.85, 0.9)),
                ));
            })
            .id();
        commands.entity(list).add_child(button);
    }
}

/// Handle level button clicks by looking up the clicked button's level id.
fn level_button_input(
    mut interaction_query: Query<
        (&Interaction, &LevelButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut select_writer: EventWriter<SelectLevelRequest>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = Color::srgb(0.3, 0.32, 0.38).into();
                select_writer.send(SelectLevelRequest {
                    id: button.id.clone(),
                });
            }
            Interaction::Hovered => {
                *bg_color = Color::srgb(0.22, 0.24, 0.3).into();
            }
            Interaction::None => {
                *bg_color = Color::srgb(0.15, 0.17, 0.22).into();
            }
        }
    }
}

/// Edit the player name with the keyboard. Every accepted edit updates the
/// profile resource, which the session layer persists.
fn player_name_input(
    mut key_events: EventReader<KeyboardInput>,
    mut profile: ResMut<PlayerProfile>,
) {
    for event in key_events.read() {
        if !event.state.is_pressed() {
            continue;
        }
        match &event.logical_key {
            Key::Character(input) => {
                for c in input.chars() {
                    if (c.is_alphanumeric() || c == '-' || c == '_')
                        && profile.name.len() < NAME_MAX_LEN
                    {
                        profile.name.push(c);
                    }
                }
            }
            Key::Backspace => {
                profile.name.pop();
            }
            _ => {}
        }
    }
}

fn update_name_text(
    profile: Res<PlayerProfile>,
    mut text_query: Query<&mut Text, With<NameValueText>>,
) {
    if !profile.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };
    *text = Text::new(profile.name.clone());
}

fn cleanup_menu(
    mut commands: Commands,
    ui_query: Query<Entity, With<MenuUi>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
