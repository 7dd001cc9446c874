//! Pure progress transitions and display queries
//!
//! The single mutating transition is quest completion: award XP, record the
//! quest id, possibly level up. Everything here is computed from the inputs
//! alone; persistence and notification are the caller's job.

use crate::catalog::quest::{Difficulty, QuestDefinition};
use crate::core::error::{QuestError, Result};
use crate::progress::snapshot::ProgressSnapshot;

/// XP required to finish a level band is `level * XP_PER_LEVEL`
pub const XP_PER_LEVEL: u64 = 100;

/// Notification emitted by a completion, in occurrence order
///
/// Events carry no state of their own; they exist for toasts and telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    QuestCompleted { id: String },
    LeveledUp { new_level: u32 },
}

/// Result of applying a quest completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub snapshot: ProgressSnapshot,
    pub events: Vec<ProgressEvent>,
}

/// Apply a quest completion to a snapshot, producing the next snapshot
///
/// Re-completing an already-recorded quest is a no-op: the snapshot comes
/// back unchanged with no events, so a duplicate submission can never award
/// XP twice.
///
/// Only one level-up is awarded per completion even if the reward could
/// cross two thresholds; observed rewards never span a full level band.
pub fn apply_quest_completion(
    snapshot: &ProgressSnapshot,
    quest: &QuestDefinition,
) -> Result<Completion> {
    if snapshot.level < 1 {
        return Err(QuestError::InvalidArgument(format!(
            "snapshot level must be >= 1, got {}",
            snapshot.level
        )));
    }
    if quest.xp_reward == 0 {
        return Err(QuestError::InvalidArgument(format!(
            "quest {} has no XP reward",
            quest.id
        )));
    }

    if snapshot.completed_quest_ids.contains(&quest.id) {
        return Ok(Completion {
            snapshot: snapshot.clone(),
            events: Vec::new(),
        });
    }

    let mut next = snapshot.clone();
    next.xp += u64::from(quest.xp_reward);
    next.completed_quest_ids.insert(quest.id.clone());

    let mut events = vec![ProgressEvent::QuestCompleted {
        id: quest.id.clone(),
    }];

    if next.xp >= u64::from(snapshot.level) * XP_PER_LEVEL {
        next.level = snapshot.level + 1;
        events.push(ProgressEvent::LeveledUp {
            new_level: next.level,
        });
    }

    Ok(Completion {
        snapshot: next,
        events,
    })
}

/// Fraction of the way through the current level band, for progress bars
///
/// Uses `xp % 100` regardless of level, while [`xp_to_next_level`] scales
/// its threshold by `level`; above level 1 the two disagree. This mirrors
/// the shipped display behavior and stays as-is until the leveling curve is
/// settled.
pub fn xp_progress_fraction(snapshot: &ProgressSnapshot) -> f32 {
    (snapshot.xp % XP_PER_LEVEL) as f32 / XP_PER_LEVEL as f32
}

/// XP remaining before the next level-up, per the displayed formula
///
/// Saturates so a snapshot that slipped past validation renders as 0
/// instead of panicking.
pub fn xp_to_next_level(snapshot: &ProgressSnapshot) -> u64 {
    (u64::from(snapshot.level) * XP_PER_LEVEL).saturating_sub(snapshot.xp % XP_PER_LEVEL)
}

/// Whether a quest is available to start
///
/// Signed-out visitors only get beginner quests. Any active identity sees
/// the whole catalog unlocked; there is deliberately no prerequisite chain.
pub fn is_quest_unlocked(
    _snapshot: &ProgressSnapshot,
    quest: &QuestDefinition,
    authenticated: bool,
) -> bool {
    if !authenticated {
        return quest.difficulty == Difficulty::Beginner;
    }
    true
}

/// Whether a quest id has been completed
pub fn is_quest_completed(snapshot: &ProgressSnapshot, quest_id: &str) -> bool {
    snapshot.completed_quest_ids.contains(quest_id)
}
