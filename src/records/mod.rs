//! Records module - persistent best-time tracking per player and level.

mod store;
mod time;

pub use store::{best_n, PlayerTimeEntry, RecordStoreError, TimeRecordStore};
pub use time::RunTime;
