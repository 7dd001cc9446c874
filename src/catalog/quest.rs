//! Quest definition types as served by the backend

use serde::{Deserialize, Serialize};

/// Difficulty tier of a quest
///
/// Tiers are ordered; unauthenticated visitors only see `Beginner` quests
/// unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// A unit of learning content, immutable once fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub xp_reward: u32,
    pub estimated_time: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One graded check run against a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub description: String,
    pub test: String,
    pub points: u32,
}

/// Full quest payload from `GET /api/quests/{id}`
///
/// Extends the catalog entry with the editor template, instructions and
/// grading checks. Only fetched when a quest is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDetail {
    #[serde(flatten)]
    pub quest: QuestDefinition,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub code_template: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}
