//! Session domain model.
//!
//! A `Session` is the only stateful entity in Gradus: one learning run with
//! a topic, a target language and the current 1-based milestone index. It is
//! process-scoped by design — never persisted, discarded at teardown.

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// One learning run.
///
/// The milestone index starts at 1 and is only ever moved by
/// [`Session::advance`], which increments it by exactly 1. The language and
/// topic are fixed at construction and immutable for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: String,
    topic: String,
    language: Language,
    milestone_index: u32,
    created_at: String,
    updated_at: String,
}

impl Session {
    /// Creates a new session at milestone 1.
    pub fn new(topic: impl Into<String>, language: Language) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.into(),
            language,
            milestone_index: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The free-text learning goal, reused verbatim in every
    /// milestone-generation prompt for this session.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Current 1-based milestone index.
    pub fn milestone_index(&self) -> u32 {
        self.milestone_index
    }

    /// Advances to the next milestone. Called only on a confirmed pass.
    pub fn advance(&mut self) {
        self.milestone_index += 1;
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    /// Deterministic name of the single playground artifact for this
    /// session: `playground.<ext>`.
    pub fn playground_file_name(&self) -> String {
        format!("playground.{}", self.language.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_milestone_one() {
        let session = Session::new("linked lists", Language::Rust);
        assert_eq!(session.milestone_index(), 1);
        assert_eq!(session.topic(), "linked lists");
        assert_eq!(session.language(), Language::Rust);
        assert!(!session.id().is_empty());
    }

    #[test]
    fn test_advance_increments_by_exactly_one() {
        let mut session = Session::new("recursion", Language::Python);
        session.advance();
        session.advance();
        session.advance();
        assert_eq!(session.milestone_index(), 4);
    }

    #[test]
    fn test_playground_file_name_follows_language() {
        assert_eq!(
            Session::new("t", Language::Python).playground_file_name(),
            "playground.py"
        );
        assert_eq!(
            Session::new("t", Language::Cpp).playground_file_name(),
            "playground.cpp"
        );
    }

    #[test]
    fn test_sessions_have_unique_ids() {
        let a = Session::new("t", Language::Go);
        let b = Session::new("t", Language::Go);
        assert_ne!(a.id(), b.id());
    }
}
