//! Integration tests for the progress engine

use codequest::catalog::{seed::seed_quests, Difficulty, QuestCatalog, QuestDefinition};
use codequest::progress::{
    apply_quest_completion, is_quest_unlocked, xp_to_next_level, ProgressEvent, ProgressSnapshot,
};
use proptest::prelude::*;

fn quest(id: &str, xp_reward: u32, difficulty: Difficulty) -> QuestDefinition {
    QuestDefinition {
        id: id.into(),
        title: id.into(),
        description: String::new(),
        difficulty,
        category: "basics".into(),
        xp_reward,
        estimated_time: "15 min".into(),
        topics: Vec::new(),
    }
}

/// Completing a new quest adds exactly its reward
#[test]
fn test_completion_adds_reward_exactly() {
    let snapshot = ProgressSnapshot {
        xp: 37,
        ..ProgressSnapshot::default()
    };
    let q = quest("basic-2", 75, Difficulty::Beginner);

    let result = apply_quest_completion(&snapshot, &q).unwrap();
    assert_eq!(result.snapshot.xp, snapshot.xp + 75);
}

/// Re-submitting a completed quest changes nothing
#[test]
fn test_resubmission_is_idempotent() {
    let q = quest("basic-1", 50, Difficulty::Beginner);
    let first = apply_quest_completion(&ProgressSnapshot::default(), &q).unwrap();
    let second = apply_quest_completion(&first.snapshot, &q).unwrap();

    assert_eq!(second.snapshot, first.snapshot);
    assert!(second.events.is_empty());
}

/// 90 XP + 50 reward crosses the level-1 threshold
#[test]
fn test_level_up_boundary() {
    let snapshot = ProgressSnapshot {
        level: 1,
        xp: 90,
        ..ProgressSnapshot::default()
    };
    let result =
        apply_quest_completion(&snapshot, &quest("basic-1", 50, Difficulty::Beginner)).unwrap();

    assert_eq!(result.snapshot.xp, 140);
    assert_eq!(result.snapshot.level, 2);
    assert!(result
        .events
        .contains(&ProgressEvent::LeveledUp { new_level: 2 }));
}

/// 10 XP + 50 reward stays inside the level-1 band
#[test]
fn test_level_up_non_trigger() {
    let snapshot = ProgressSnapshot {
        level: 1,
        xp: 10,
        ..ProgressSnapshot::default()
    };
    let result =
        apply_quest_completion(&snapshot, &quest("basic-1", 50, Difficulty::Beginner)).unwrap();

    assert_eq!(result.snapshot.xp, 60);
    assert_eq!(result.snapshot.level, 1);
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, ProgressEvent::LeveledUp { .. })));
}

/// Visitors only see beginner quests unlocked
#[test]
fn test_unlock_gating() {
    let snapshot = ProgressSnapshot::default();
    let beginner = quest("basic-1", 50, Difficulty::Beginner);
    let advanced = quest("adv-1", 200, Difficulty::Advanced);

    assert!(is_quest_unlocked(&snapshot, &beginner, false));
    assert!(!is_quest_unlocked(&snapshot, &advanced, false));
    // Any active identity sees the full catalog
    assert!(is_quest_unlocked(&snapshot, &advanced, true));
}

/// Working through the whole seed catalog accumulates every reward once
#[test]
fn test_seed_catalog_walkthrough() {
    let catalog = QuestCatalog::seeded();
    let mut snapshot = ProgressSnapshot::default();

    let mut expected_xp = 0u64;
    for q in catalog.iter() {
        expected_xp += u64::from(q.xp_reward);
        snapshot = apply_quest_completion(&snapshot, q).unwrap().snapshot;
    }

    assert_eq!(snapshot.xp, expected_xp);
    assert_eq!(snapshot.completed_count(), catalog.len());

    // A second pass awards nothing further
    for q in catalog.iter() {
        snapshot = apply_quest_completion(&snapshot, q).unwrap().snapshot;
    }
    assert_eq!(snapshot.xp, expected_xp);
}

/// The displayed xp-to-next-level never exceeds the level threshold
#[test]
fn test_xp_to_next_level_bounded() {
    let mut snapshot = ProgressSnapshot::default();
    for q in seed_quests() {
        snapshot = apply_quest_completion(&snapshot, &q).unwrap().snapshot;
        let remaining = xp_to_next_level(&snapshot);
        assert!(remaining >= 1);
        assert!(remaining <= u64::from(snapshot.level) * 100);
    }
}

proptest! {
    /// XP and the completed set never shrink across any completion sequence
    #[test]
    fn prop_completion_sequences_are_monotonic(
        rewards in prop::collection::vec(1u32..=250, 1..30)
    ) {
        let mut snapshot = ProgressSnapshot::default();
        let mut prev_xp = snapshot.xp;
        let mut prev_completed = snapshot.completed_count();
        let mut prev_level = snapshot.level;

        for (i, reward) in rewards.iter().enumerate() {
            let q = quest(&format!("q-{}", i), *reward, Difficulty::Beginner);
            let result = apply_quest_completion(&snapshot, &q).unwrap();
            snapshot = result.snapshot;

            prop_assert!(snapshot.xp >= prev_xp);
            prop_assert!(snapshot.completed_count() >= prev_completed);
            prop_assert!(snapshot.level >= prev_level);

            prev_xp = snapshot.xp;
            prev_completed = snapshot.completed_count();
            prev_level = snapshot.level;
        }
    }

    /// Duplicate ids anywhere in the sequence award XP at most once
    #[test]
    fn prop_duplicates_never_double_award(
        ids in prop::collection::vec(0u32..8, 1..40)
    ) {
        let mut snapshot = ProgressSnapshot::default();
        let mut seen = std::collections::BTreeSet::new();
        let mut expected_xp = 0u64;

        for id in ids {
            let q = quest(&format!("q-{}", id), 50, Difficulty::Beginner);
            if seen.insert(id) {
                expected_xp += 50;
            }
            snapshot = apply_quest_completion(&snapshot, &q).unwrap().snapshot;
        }

        prop_assert_eq!(snapshot.xp, expected_xp);
        prop_assert_eq!(snapshot.completed_count(), seen.len());
    }
}
