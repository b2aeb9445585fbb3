//! Session module - selection/load/restart orchestration and identity.

mod config;
mod controller;
mod identity;
mod plugin;

pub use config::ContentConfig;
pub use controller::{
    SessionController, SessionEffect, SessionError, SessionPhase, RESTART_DELAY_SECS,
};
pub use identity::PlayerProfile;
pub use plugin::{BestTimesDisplay, PendingRestart, RunClock, SessionPlugin};
