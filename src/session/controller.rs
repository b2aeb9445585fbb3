//! Session controller - the state machine driving selection, loading, and
//! run completion.
//!
//! The controller only decides: its methods validate a transition, update the
//! phase, and return the effects the host should execute (scene transitions,
//! record writes, restart timers). Systems in `plugin.rs` perform the effects,
//! which keeps every transition testable without a running app.

use bevy::prelude::*;
use thiserror::Error;

use crate::records::RunTime;

/// Delay before the play scene reloads after a completed run, in seconds.
pub const RESTART_DELAY_SECS: f32 = 0.5;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing selected yet (fresh session, or back in the menu).
    NoLevelSelected,
    /// A level is selected; its content is not composed yet.
    LevelSelected,
    /// The selected level's content is composed in the play scene.
    LevelLoaded,
}

/// Effects the host must execute after a controller transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Transition to (or reload content in) the play scene.
    EnterPlayScene,
    /// Re-scan the levels directory for the menu.
    RefreshCatalog,
    /// Drop any pending restart timer; a newer transition supersedes it.
    CancelPendingRestart,
    /// Persist a completed run for the given level.
    SaveRecord { level_id: String, time: RunTime },
    /// Arm the delayed-restart timer. Arming again restarts the delay, so the
    /// last scheduled transition always wins.
    ScheduleRestart { delay_secs: f32 },
}

/// Transition attempted in the wrong phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No level selected; nothing to load in the play scene")]
    NoLevelSelected,

    #[error("No level is loaded; a run cannot complete here")]
    NoLevelLoaded,
}

/// Process-wide session state: the player identity, the last selection, and
/// the load phase. Constructed once at startup and handed to systems as a
/// resource rather than hiding behind a global.
#[derive(Resource, Debug)]
pub struct SessionController {
    player_name: String,
    selected_level: Option<String>,
    phase: SessionPhase,
}

impl SessionController {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            selected_level: None,
            phase: SessionPhase::NoLevelSelected,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Last selected level id. Never cleared once set.
    pub fn selected_level(&self) -> Option<&str> {
        self.selected_level.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// A level was chosen in the menu. Valid in any phase; supersedes any
    /// pending restart.
    pub fn select_level(&mut self, id: impl Into<String>) -> Vec<SessionEffect> {
        self.selected_level = Some(id.into());
        self.phase = SessionPhase::LevelSelected;
        vec![
            SessionEffect::CancelPendingRestart,
            SessionEffect::EnterPlayScene,
        ]
    }

    /// The play scene is up and asks what to load. Returns the selected level
    /// id and moves to `LevelLoaded`; without a selection nothing is loaded.
    pub fn on_play_scene_ready(&mut self) -> Result<String, SessionError> {
        let id = self
            .selected_level
            .clone()
            .ok_or(SessionError::NoLevelSelected)?;
        self.phase = SessionPhase::LevelLoaded;
        Ok(id)
    }

    /// Loading or composing the selected level failed after the play scene
    /// handshake. Back to `LevelSelected`: the selection stands for a retry,
    /// but no run can complete against content that never loaded.
    pub fn on_load_failed(&mut self) {
        self.phase = SessionPhase::LevelSelected;
    }

    /// The menu scene is up: refresh its level list. The selection survives,
    /// only the phase resets.
    pub fn on_menu_scene_ready(&mut self) -> Vec<SessionEffect> {
        self.phase = SessionPhase::NoLevelSelected;
        vec![SessionEffect::RefreshCatalog]
    }

    /// A run finished. Valid only while a level is loaded; saves the time and
    /// schedules the delayed restart.
    pub fn complete_run(&mut self, time: RunTime) -> Result<Vec<SessionEffect>, SessionError> {
        if self.phase != SessionPhase::LevelLoaded {
            return Err(SessionError::NoLevelLoaded);
        }
        let level_id = self
            .selected_level
            .clone()
            .ok_or(SessionError::NoLevelSelected)?;
        Ok(vec![
            SessionEffect::SaveRecord { level_id, time },
            SessionEffect::ScheduleRestart {
                delay_secs: RESTART_DELAY_SECS,
            },
        ])
    }

    /// The delayed restart fired: back to `LevelSelected`, reload the play
    /// scene content.
    pub fn on_restart_fired(&mut self) -> Vec<SessionEffect> {
        self.phase = SessionPhase::LevelSelected;
        vec![SessionEffect::EnterPlayScene]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_then_load_reaches_level_loaded() {
        let mut session = SessionController::new("alice");
        assert_eq!(session.phase(), SessionPhase::NoLevelSelected);

        let effects = session.select_level("level1");
        assert_eq!(session.phase(), SessionPhase::LevelSelected);
        assert!(effects.contains(&SessionEffect::EnterPlayScene));

        let id = session.on_play_scene_ready().unwrap();
        assert_eq!(id, "level1");
        assert_eq!(session.phase(), SessionPhase::LevelLoaded);
    }

    #[test]
    fn play_scene_without_selection_loads_nothing() {
        let mut session = SessionController::new("alice");
        assert_eq!(
            session.on_play_scene_ready(),
            Err(SessionError::NoLevelSelected)
        );
        assert_eq!(session.phase(), SessionPhase::NoLevelSelected);
    }

    #[test]
    fn menu_refreshes_catalog_but_keeps_selection() {
        let mut session = SessionController::new("alice");
        session.select_level("level1");
        session.on_play_scene_ready().unwrap();

        let effects = session.on_menu_scene_ready();
        assert_eq!(effects, vec![SessionEffect::RefreshCatalog]);
        assert_eq!(session.phase(), SessionPhase::NoLevelSelected);
        assert_eq!(session.selected_level(), Some("level1"));
    }

    #[test]
    fn complete_run_saves_and_schedules_restart() {
        let mut session = SessionController::new("alice");
        session.select_level("level1");
        session.on_play_scene_ready().unwrap();

        let effects = session.complete_run(RunTime::from_millis(12340)).unwrap();
        assert_eq!(
            effects,
            vec![
                SessionEffect::SaveRecord {
                    level_id: "level1".to_string(),
                    time: RunTime::from_millis(12340),
                },
                SessionEffect::ScheduleRestart {
                    delay_secs: RESTART_DELAY_SECS,
                },
            ]
        );
    }

    #[test]
    fn complete_run_outside_a_loaded_level_is_rejected() {
        let mut session = SessionController::new("alice");
        assert_eq!(
            session.complete_run(RunTime::from_millis(1)),
            Err(SessionError::NoLevelLoaded)
        );

        session.select_level("level1");
        assert_eq!(
            session.complete_run(RunTime::from_millis(1)),
            Err(SessionError::NoLevelLoaded)
        );
    }

    #[test]
    fn failed_load_rejects_run_completion_until_reloaded() {
        let mut session = SessionController::new("alice");
        session.select_level("level1");
        session.on_play_scene_ready().unwrap();

        // The play scene came up but the level content did not.
        session.on_load_failed();
        assert_eq!(session.phase(), SessionPhase::LevelSelected);
        assert_eq!(
            session.complete_run(RunTime::from_millis(1000)),
            Err(SessionError::NoLevelLoaded)
        );

        // A successful reload goes through the normal handshake and recovers.
        assert_eq!(session.on_play_scene_ready().unwrap(), "level1");
        assert!(session.complete_run(RunTime::from_millis(1000)).is_ok());
    }

    #[test]
    fn restart_returns_to_level_selected_and_reloads() {
        let mut session = SessionController::new("alice");
        session.select_level("level1");
        session.on_play_scene_ready().unwrap();
        session.complete_run(RunTime::from_millis(1000)).unwrap();

        let effects = session.on_restart_fired();
        assert_eq!(session.phase(), SessionPhase::LevelSelected);
        assert_eq!(effects, vec![SessionEffect::EnterPlayScene]);

        // The reload path goes through the normal ready handshake.
        assert_eq!(session.on_play_scene_ready().unwrap(), "level1");
        assert_eq!(session.phase(), SessionPhase::LevelLoaded);
    }

    #[test]
    fn selecting_again_supersedes_a_pending_restart() {
        let mut session = SessionController::new("alice");
        session.select_level("level1");
        session.on_play_scene_ready().unwrap();
        session.complete_run(RunTime::from_millis(1000)).unwrap();

        // A new selection arrives before the restart timer fires.
        let effects = session.select_level("level2");
        assert_eq!(effects[0], SessionEffect::CancelPendingRestart);
        assert_eq!(session.selected_level(), Some("level2"));
        assert_eq!(session.on_play_scene_ready().unwrap(), "level2");
    }
}
