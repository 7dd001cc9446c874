//! Progress state machine and persistence
//!
//! The engine computes new snapshots from quest completions; the store
//! persists them remotely for registered identities and locally for guests.

pub mod engine;
pub mod local;
pub mod snapshot;
pub mod store;

pub use engine::{
    apply_quest_completion, is_quest_completed, is_quest_unlocked, xp_progress_fraction,
    xp_to_next_level, Completion, ProgressEvent, XP_PER_LEVEL,
};
pub use local::GuestStorage;
pub use snapshot::ProgressSnapshot;
pub use store::{ProgressStore, ProgressTransport};
