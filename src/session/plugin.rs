//! Session plugin - wires the controller's decisions to the running app.
//!
//! Systems here translate UI and gameplay events into controller transitions,
//! then execute the effects the controller returns: scene transitions, level
//! content loading, record writes, and the cancellable restart timer.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::time::Stopwatch;

use crate::core::{GameState, LoadLevelContent, RunCompleted, SelectLevelRequest};
use crate::level::{
    self, compose, LevelCatalog, LevelPiece, LevelRoot, PrefabRegistry, WorldSceneSink,
};
use crate::player::{CameraTracker, Player};
use crate::records::{best_n, PlayerTimeEntry, RunTime, TimeRecordStore};

use super::config::ContentConfig;
use super::controller::{SessionController, SessionEffect};
use super::identity::PlayerProfile;

/// Best times of the loaded level, for the in-game panel.
#[derive(Resource, Debug, Default)]
pub struct BestTimesDisplay {
    pub level_id: String,
    pub entries: Vec<PlayerTimeEntry>,
}

/// Stopwatch measuring the current run. Reset whenever level content loads.
#[derive(Resource, Default)]
pub struct RunClock {
    stopwatch: Stopwatch,
}

impl RunClock {
    pub fn current(&self) -> RunTime {
        RunTime::from_secs_f64(self.stopwatch.elapsed().as_secs_f64())
    }

    fn reset(&mut self) {
        self.stopwatch.reset();
    }
}

/// Armed after a completed run; when it fires, the play scene reloads.
/// Re-inserting the resource replaces the timer, so the last scheduled
/// transition wins.
#[derive(Resource)]
pub struct PendingRestart(pub Timer);

/// Session plugin - orchestrates selection, loading, and run completion.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BestTimesDisplay>()
            .init_resource::<RunClock>()
            .add_systems(Startup, setup_session)
            .add_systems(OnEnter(GameState::Menu), menu_scene_ready)
            .add_systems(OnEnter(GameState::InGame), announce_play_scene)
            .add_systems(OnExit(GameState::InGame), cancel_pending_restart)
            .add_systems(
                Update,
                (
                    handle_level_selection,
                    persist_profile_changes,
                    (
                        load_level_content,
                        tick_run_clock,
                        finish_run_input,
                        handle_run_completed,
                        tick_pending_restart,
                    )
                        .run_if(in_state(GameState::InGame)),
                ),
            );
    }
}

/// Load config and the saved profile, then construct the session resources.
fn setup_session(mut commands: Commands) {
    let config = ContentConfig::load();
    let profile = PlayerProfile::load(&config.profile_path());
    info!("Session started for player '{}'", profile.name);

    commands.insert_resource(SessionController::new(profile.name.clone()));
    commands.insert_resource(TimeRecordStore::new(config.saves_dir.clone()));
    commands.insert_resource(profile);
    commands.insert_resource(config);
}

/// Menu scene is up: reset the phase and refresh the level catalog.
fn menu_scene_ready(
    mut controller: ResMut<SessionController>,
    mut catalog: ResMut<LevelCatalog>,
    config: Res<ContentConfig>,
) {
    for effect in controller.on_menu_scene_ready() {
        match effect {
            SessionEffect::RefreshCatalog => {
                if let Err(e) = catalog.refresh(&config.levels_dir) {
                    error!("Level catalog refresh failed: {}", e);
                } else {
                    info!("Discovered {} level(s)", catalog.levels.len());
                }
            }
            effect => warn!("Unexpected session effect on menu ready: {:?}", effect),
        }
    }
}

/// A level button was clicked: let the controller decide, then transition.
fn handle_level_selection(
    mut commands: Commands,
    mut requests: EventReader<SelectLevelRequest>,
    mut controller: ResMut<SessionController>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut load_writer: EventWriter<LoadLevelContent>,
) {
    for request in requests.read() {
        info!("Level selected: {}", request.id);
        for effect in controller.select_level(&request.id) {
            match effect {
                SessionEffect::CancelPendingRestart => {
                    commands.remove_resource::<PendingRestart>();
                }
                SessionEffect::EnterPlayScene => {
                    if *state.get() == GameState::InGame {
                        load_writer.send(LoadLevelContent);
                    } else {
                        next_state.set(GameState::InGame);
                    }
                }
                effect => warn!("Unexpected session effect on selection: {:?}", effect),
            }
        }
    }
}

/// The play scene just opened: request its content.
fn announce_play_scene(mut load_writer: EventWriter<LoadLevelContent>) {
    load_writer.send(LoadLevelContent);
}

/// Parse and compose the selected level, then fetch its best times.
///
/// Runs synchronously within one frame; the scene is fully populated (or the
/// failure logged) before anything else observes the new content.
#[allow(clippy::too_many_arguments)]
fn load_level_content(
    mut events: EventReader<LoadLevelContent>,
    mut commands: Commands,
    mut controller: ResMut<SessionController>,
    catalog: Res<LevelCatalog>,
    prefabs: Res<PrefabRegistry>,
    store: Res<TimeRecordStore>,
    asset_server: Res<AssetServer>,
    mut best_times: ResMut<BestTimesDisplay>,
    mut run_clock: ResMut<RunClock>,
    roots: Query<Entity, With<LevelRoot>>,
    player: Query<Entity, With<Player>>,
    tracker: Query<Entity, With<CameraTracker>>,
    named: Query<(Entity, &Name), Without<LevelPiece>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let level_id = match controller.on_play_scene_ready() {
        Ok(id) => id,
        Err(e) => {
            warn!("Play scene ready but {}", e);
            return;
        }
    };

    let Some(entry) = catalog.get(&level_id) else {
        error!("Selected level '{}' is not in the catalog", level_id);
        controller.on_load_failed();
        return;
    };

    let description = match level::parse(&entry.path) {
        Ok(description) => description,
        Err(e) => {
            error!("Level '{}' failed to load: {}", level_id, e);
            controller.on_load_failed();
            return;
        }
    };

    let named_entities: HashMap<String, Entity> = named
        .iter()
        .map(|(entity, name)| (name.as_str().to_string(), entity))
        .collect();
    let mut sink = WorldSceneSink::new(
        &mut commands,
        &asset_server,
        roots.iter().collect(),
        player.get_single().ok(),
        tracker.get_single().ok(),
        named_entities,
    );

    match compose(&description, &*prefabs, &mut sink) {
        Ok(report) => info!(
            "Composed level '{}': {} item(s) instantiated, {} unresolved",
            level_id, report.instantiated, report.unresolved_assets
        ),
        Err(e) => {
            error!("Level '{}' failed to compose: {}", level_id, e);
            controller.on_load_failed();
            return;
        }
    }

    run_clock.reset();

    let history = store.load(controller.player_name(), &level_id);
    *best_times = BestTimesDisplay {
        level_id,
        entries: best_n(&history, 3),
    };
}

fn tick_run_clock(time: Res<Time>, mut run_clock: ResMut<RunClock>) {
    run_clock.stopwatch.tick(time.delta());
}

/// Goal collision wiring lives outside this layer; the Return key stands in
/// for reaching the goal.
fn finish_run_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    run_clock: Res<RunClock>,
    mut completed_writer: EventWriter<RunCompleted>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        completed_writer.send(RunCompleted {
            time: run_clock.current(),
        });
    }
}

/// A run finished: save the time and arm the delayed restart.
fn handle_run_completed(
    mut commands: Commands,
    mut events: EventReader<RunCompleted>,
    mut controller: ResMut<SessionController>,
    store: Res<TimeRecordStore>,
) {
    for completed in events.read() {
        let effects = match controller.complete_run(completed.time) {
            Ok(effects) => effects,
            Err(e) => {
                warn!("Ignoring run completion: {}", e);
                continue;
            }
        };

        for effect in effects {
            match effect {
                SessionEffect::SaveRecord { level_id, time } => {
                    let player = controller.player_name().to_string();
                    // One retry; losing a completed run silently is not
                    // acceptable, so the failure is loud either way.
                    if let Err(first) = store.append(&player, &level_id, time) {
                        warn!("Saving run time failed, retrying: {}", first);
                        if let Err(second) = store.append(&player, &level_id, time) {
                            error!(
                                "Run time {} for '{}' was NOT saved: {}",
                                time, level_id, second
                            );
                        }
                    } else {
                        info!("Saved run time {} for '{}'", time, level_id);
                    }
                }
                SessionEffect::ScheduleRestart { delay_secs } => {
                    commands.insert_resource(PendingRestart(Timer::from_seconds(
                        delay_secs,
                        TimerMode::Once,
                    )));
                }
                effect => warn!("Unexpected session effect on run completion: {:?}", effect),
            }
        }
    }
}

/// Fire the delayed restart when its timer elapses.
fn tick_pending_restart(
    mut commands: Commands,
    time: Res<Time>,
    pending: Option<ResMut<PendingRestart>>,
    mut controller: ResMut<SessionController>,
    mut load_writer: EventWriter<LoadLevelContent>,
) {
    let Some(mut pending) = pending else {
        return;
    };
    if !pending.0.tick(time.delta()).finished() {
        return;
    }
    commands.remove_resource::<PendingRestart>();

    for effect in controller.on_restart_fired() {
        match effect {
            SessionEffect::EnterPlayScene => {
                load_writer.send(LoadLevelContent);
            }
            effect => warn!("Unexpected session effect on restart: {:?}", effect),
        }
    }
}

/// Leaving the play scene abandons any scheduled restart.
fn cancel_pending_restart(mut commands: Commands) {
    commands.remove_resource::<PendingRestart>();
}

/// Mirror name edits into the controller and the identity store.
fn persist_profile_changes(
    profile: Res<PlayerProfile>,
    mut controller: ResMut<SessionController>,
    config: Res<ContentConfig>,
) {
    if profile.is_changed() && !profile.is_added() {
        controller.set_player_name(profile.name.clone());
        profile.save(&config.profile_path());
    }
}
