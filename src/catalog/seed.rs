//! Built-in seed quests
//!
//! Used when the backend cannot be reached so the client stays usable
//! offline. This is a representative subset of the real catalog, not a
//! complete mirror; consumers must treat it as equivalent in shape only.

use crate::catalog::quest::{Difficulty, QuestDefinition};

/// The fallback quest list
pub fn seed_quests() -> Vec<QuestDefinition> {
    vec![
        QuestDefinition {
            id: "basic-1".into(),
            title: "Variables & Data Types".into(),
            description: "Learn the fundamentals of Python variables and basic data types".into(),
            difficulty: Difficulty::Beginner,
            category: "basics".into(),
            xp_reward: 50,
            estimated_time: "15 min".into(),
            topics: vec![
                "Variables".into(),
                "Strings".into(),
                "Numbers".into(),
                "Booleans".into(),
            ],
        },
        QuestDefinition {
            id: "basic-2".into(),
            title: "Control Flow".into(),
            description: "Master if statements, loops, and conditional logic".into(),
            difficulty: Difficulty::Beginner,
            category: "basics".into(),
            xp_reward: 75,
            estimated_time: "20 min".into(),
            topics: vec![
                "If statements".into(),
                "For loops".into(),
                "While loops".into(),
            ],
        },
        QuestDefinition {
            id: "basic-3".into(),
            title: "Functions".into(),
            description: "Create reusable code with functions and parameters".into(),
            difficulty: Difficulty::Beginner,
            category: "basics".into(),
            xp_reward: 100,
            estimated_time: "25 min".into(),
            topics: vec![
                "Functions".into(),
                "Parameters".into(),
                "Return values".into(),
            ],
        },
        QuestDefinition {
            id: "oop-1".into(),
            title: "Classes & Objects".into(),
            description: "Dive into Object-Oriented Programming with classes".into(),
            difficulty: Difficulty::Intermediate,
            category: "oop".into(),
            xp_reward: 150,
            estimated_time: "30 min".into(),
            topics: vec![
                "Classes".into(),
                "Objects".into(),
                "Methods".into(),
                "Attributes".into(),
            ],
        },
        QuestDefinition {
            id: "oop-2".into(),
            title: "Inheritance".into(),
            description: "Learn about class inheritance and method overriding".into(),
            difficulty: Difficulty::Intermediate,
            category: "oop".into(),
            xp_reward: 200,
            estimated_time: "35 min".into(),
            topics: vec![
                "Inheritance".into(),
                "Super".into(),
                "Method overriding".into(),
            ],
        },
        QuestDefinition {
            id: "ds-1".into(),
            title: "Lists & Dictionaries".into(),
            description: "Master Python data structures and their operations".into(),
            difficulty: Difficulty::Intermediate,
            category: "data-structures".into(),
            xp_reward: 175,
            estimated_time: "30 min".into(),
            topics: vec![
                "Lists".into(),
                "Dictionaries".into(),
                "Tuples".into(),
                "Sets".into(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let quests = seed_quests();
        let mut ids: Vec<_> = quests.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), quests.len());
    }

    #[test]
    fn test_seed_rewards_are_positive() {
        for quest in seed_quests() {
            assert!(quest.xp_reward > 0, "quest {} has zero reward", quest.id);
        }
    }

    #[test]
    fn test_seed_has_beginner_entry_point() {
        // A signed-out visitor must have something unlocked to try
        assert!(seed_quests()
            .iter()
            .any(|q| q.difficulty == Difficulty::Beginner));
    }
}
