//! Async HTTP client for the backend service
//!
//! Thin wrapper over the API contract: quest catalog, per-user progress,
//! registration, code execution, hints and the leaderboard. Transport and
//! decode failures on fetch paths map to `RemoteUnavailable`; the store
//! decides when a failed save becomes `SyncFailed`.

use crate::api::types::{
    ExecutionReport, ExecutionRequest, HintRequest, HintResponse, LeaderboardEntry,
    RegistrationRequest, TimeFilter,
};
use crate::catalog::quest::{QuestDefinition, QuestDetail};
use crate::core::config::AppConfig;
use crate::core::error::{QuestError, Result};
use crate::progress::snapshot::ProgressSnapshot;
use crate::progress::store::ProgressTransport;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Async client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default HTTP settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client from application config (applies the request timeout)
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: normalize_base_url(config.backend_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/health` - true when the backend answers
    pub async fn health(&self) -> bool {
        match self.client.get(self.url("/api/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// `GET /api/quests` - the full quest catalog
    pub async fn fetch_quests(&self) -> Result<Vec<QuestDefinition>> {
        let response = self
            .client
            .get(self.url("/api/quests"))
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "quest list fetch returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }

    /// `GET /api/quests/{id}` - full quest payload with template and checks
    pub async fn fetch_quest(&self, id: &str) -> Result<QuestDetail> {
        let response = self
            .client
            .get(self.url(&format!("/api/quests/{}", id)))
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(QuestError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "quest fetch returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }

    /// `POST /api/auth/register` - create the backend profile for a newly
    /// registered identity
    pub async fn register(&self, token: &str, request: &RegistrationRequest) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .header("Authorization", format!("Bearer {}", token))
            .json(request)
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuestError::RemoteUnavailable(format!(
                "registration failed: {}",
                body
            )));
        }
        Ok(())
    }

    /// `POST /api/code/execute` - run a submission in the sandbox
    pub async fn execute_code(&self, request: &ExecutionRequest) -> Result<ExecutionReport> {
        let response = self
            .client
            .post(self.url("/api/code/execute"))
            .json(request)
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "code execution returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }

    /// `POST /api/code/hint` - contextual hint for the current submission
    pub async fn request_hint(&self, request: &HintRequest) -> Result<HintResponse> {
        let response = self
            .client
            .post(self.url("/api/code/hint"))
            .json(request)
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "hint request returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }

    /// `GET /api/leaderboard` - ranked user summaries
    pub async fn fetch_leaderboard(
        &self,
        time: TimeFilter,
        category: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let response = self
            .client
            .get(self.url("/api/leaderboard"))
            .query(&[
                ("timeFilter", time.as_str()),
                ("categoryFilter", category.unwrap_or("all")),
            ])
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "leaderboard fetch returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }
}

impl ProgressTransport for ApiClient {
    /// `GET /api/user/progress` with the session bearer token
    async fn fetch_progress(&self, token: &str) -> Result<ProgressSnapshot> {
        let response = self
            .client
            .get(self.url("/api/user/progress"))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "progress fetch returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))
    }

    /// `POST /api/user/progress` with the session bearer token
    async fn store_progress(&self, token: &str, snapshot: &ProgressSnapshot) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/user/progress"))
            .header("Authorization", format!("Bearer {}", token))
            .json(snapshot)
            .send()
            .await
            .map_err(|e| QuestError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuestError::RemoteUnavailable(format!(
                "progress save returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
