//! The progress record for one identity at a point in time

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Full progress state for the active identity
///
/// Owned by the store; the engine receives snapshots by reference and
/// produces new values, never mutating its input. Along a snapshot chain
/// `xp` never decreases and `completed_quest_ids` only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub level: u32,
    pub xp: u64,
    #[serde(rename = "completed_quests", default)]
    pub completed_quest_ids: BTreeSet<String>,
    #[serde(rename = "current_quest", default)]
    pub current_quest_id: Option<String>,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            completed_quest_ids: BTreeSet::new(),
            current_quest_id: None,
            achievements: BTreeSet::new(),
        }
    }
}

impl ProgressSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed_count(&self) -> usize {
        self.completed_quest_ids.len()
    }

    /// Check the invariants the engine and display formulas rely on
    ///
    /// Levels start at 1; a `level: 0` payload deserializes fine but is not
    /// a valid snapshot.
    pub fn validate(&self) -> Result<(), String> {
        if self.level < 1 {
            return Err(format!("level must be >= 1, got {}", self.level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let snapshot = ProgressSnapshot::default();
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.xp, 0);
        assert!(snapshot.completed_quest_ids.is_empty());
        assert!(snapshot.current_quest_id.is_none());
        assert!(snapshot.achievements.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.completed_quest_ids.insert("basic-1".into());
        snapshot.current_quest_id = Some("basic-2".into());

        let value = serde_json::to_value(&snapshot).unwrap();
        // Backend contract uses snake_case with shortened names
        assert!(value.get("completed_quests").is_some());
        assert!(value.get("current_quest").is_some());
        assert!(value.get("completed_quest_ids").is_none());
    }

    #[test]
    fn test_validate_rejects_zero_level() {
        let snapshot: ProgressSnapshot = serde_json::from_str(r#"{"level": 0, "xp": 40}"#).unwrap();
        assert!(snapshot.validate().is_err());
        assert!(ProgressSnapshot::default().validate().is_ok());
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        // Backend may omit optional fields for fresh accounts
        let snapshot: ProgressSnapshot = serde_json::from_str(r#"{"level": 3, "xp": 240}"#).unwrap();
        assert_eq!(snapshot.level, 3);
        assert_eq!(snapshot.xp, 240);
        assert!(snapshot.completed_quest_ids.is_empty());
    }
}
