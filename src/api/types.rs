//! Wire types for the backend API

use crate::progress::snapshot::ProgressSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub external_id: String,
    pub email: String,
    pub username: String,
}

/// Body of `POST /api/code/execute`
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub quest_id: String,
}

/// One graded check from the execution sandbox
#[derive(Debug, Clone, Deserialize)]
pub struct TestResult {
    pub description: String,
    pub passed: bool,
    pub points: u32,
}

/// Response of `POST /api/code/execute`
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionReport {
    pub output: String,
    pub success: bool,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

/// Body of `POST /api/code/hint`
#[derive(Debug, Clone, Serialize)]
pub struct HintRequest {
    pub quest_id: String,
    pub code: String,
    pub progress: ProgressSnapshot,
}

/// Response of `POST /api/code/hint`
#[derive(Debug, Clone, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

/// One ranked row from `GET /api/leaderboard`
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub completed_quests: u32,
    #[serde(default)]
    pub achievements: u32,
}

/// Time window for the leaderboard query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    AllTime,
    Daily,
    Weekly,
    Monthly,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::AllTime => "all-time",
            TimeFilter::Daily => "daily",
            TimeFilter::Weekly => "weekly",
            TimeFilter::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-time" => Ok(TimeFilter::AllTime),
            "daily" => Ok(TimeFilter::Daily),
            "weekly" => Ok(TimeFilter::Weekly),
            "monthly" => Ok(TimeFilter::Monthly),
            other => Err(format!(
                "unknown time filter '{}' (expected all-time, daily, weekly or monthly)",
                other
            )),
        }
    }
}
