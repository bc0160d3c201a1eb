use serde::Serialize;
use uuid::Uuid;

use crate::models::{Suggestion, SuggestionId};

/// Read-only projection of a session handed to the presentation layer.
///
/// Plain data only: the host renders `current_text`, lists `suggestions`
/// (ordered by start, then id) and enables undo/redo controls from the two
/// capability flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub session_id: Uuid,
    /// Bumped on every successful mutation, undo and redo included
    pub revision: u64,
    pub base_text: String,
    pub current_text: String,
    pub suggestions: Vec<Suggestion>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl DocumentView {
    pub fn pending(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter().filter(|s| s.is_pending())
    }

    pub fn resolved(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter().filter(|s| !s.is_pending())
    }

    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }
}
