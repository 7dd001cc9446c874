//! Quest catalog
//!
//! Read-only collection of quest definitions, fetched once from the backend
//! and cached for the lifetime of the session. On remote failure the catalog
//! falls back to the built-in seed list so the client stays usable degraded.

pub mod quest;
pub mod seed;

pub use quest::{Difficulty, QuestDefinition, QuestDetail, TestCase};

use crate::api::client::ApiClient;
use crate::core::error::{QuestError, Result};

/// Immutable quest collection for one session
#[derive(Debug, Clone)]
pub struct QuestCatalog {
    quests: Vec<QuestDefinition>,
    from_seed: bool,
}

impl QuestCatalog {
    /// Fetch the catalog from the backend, falling back to the seed list
    pub async fn load(api: &ApiClient) -> Self {
        match api.fetch_quests().await {
            Ok(quests) if !quests.is_empty() => {
                tracing::debug!("loaded {} quests from backend", quests.len());
                Self {
                    quests,
                    from_seed: false,
                }
            }
            Ok(_) => {
                tracing::warn!("backend returned an empty quest list, using seed catalog");
                Self::seeded()
            }
            Err(e) => {
                tracing::warn!("quest catalog fetch failed ({}), using seed catalog", e);
                Self::seeded()
            }
        }
    }

    /// The built-in fallback catalog
    pub fn seeded() -> Self {
        Self {
            quests: seed::seed_quests(),
            from_seed: true,
        }
    }

    /// Build a catalog from explicit definitions
    pub fn from_quests(quests: Vec<QuestDefinition>) -> Self {
        Self {
            quests,
            from_seed: false,
        }
    }

    /// Look up a quest by id
    pub fn get(&self, id: &str) -> Result<&QuestDefinition> {
        self.quests
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| QuestError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// True when this catalog came from the seed fallback rather than the
    /// backend
    pub fn is_fallback(&self) -> bool {
        self.from_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_quest() {
        let catalog = QuestCatalog::seeded();
        let quest = catalog.get("basic-1").unwrap();
        assert_eq!(quest.title, "Variables & Data Types");
    }

    #[test]
    fn test_get_unknown_quest_is_not_found() {
        let catalog = QuestCatalog::seeded();
        let result = catalog.get("no-such-quest");
        match result {
            Err(QuestError::NotFound(id)) => assert_eq!(id, "no-such-quest"),
            other => panic!("expected NotFound, got {:?}", other.map(|q| &q.id)),
        }
    }

    #[test]
    fn test_seeded_catalog_is_flagged_as_fallback() {
        assert!(QuestCatalog::seeded().is_fallback());
        assert!(!QuestCatalog::from_quests(seed::seed_quests()).is_fallback());
    }
}
