//! Shared fixtures for unit tests across the crate.

use crate::SuggestionSession;
use crate::producer::SuggestionDraft;

/// The canonical single-typo document
pub fn teh_session() -> SuggestionSession {
    SuggestionSession::new(
        "This is teh improved text.",
        vec![
            SuggestionDraft::new(8, 11, "the")
                .with_original("teh")
                .with_reason("typo"),
        ],
    )
    .unwrap()
}

/// "one two three" with a translation suggested for every word
pub fn three_word_session() -> SuggestionSession {
    SuggestionSession::new(
        "one two three",
        vec![
            SuggestionDraft::new(0, 3, "uno"),
            SuggestionDraft::new(4, 7, "dos"),
            SuggestionDraft::new(8, 13, "tres"),
        ],
    )
    .unwrap()
}
