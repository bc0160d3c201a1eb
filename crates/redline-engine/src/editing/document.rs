use crate::editing::{SpanIndex, Text};
use crate::error::{RangeProblem, Result, RevisionError};
use crate::models::{Suggestion, SuggestionId};
use crate::producer::SuggestionDraft;

/// The mutable part of a document: current text plus every suggestion.
///
/// This is also the snapshot type kept in history. Both fields are value
/// types (the text shares rope nodes, the index owns its suggestions), so a
/// clone taken before a mutation can never be changed by that mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub(crate) text: Text,
    pub(crate) index: SpanIndex,
}

impl DocumentState {
    pub fn new(text: Text, index: SpanIndex) -> Self {
        Self { text, index }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn index(&self) -> &SpanIndex {
        &self.index
    }

    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.index.get(id)
    }
}

/// A base text under review together with its current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    base_text: Text,
    pub(crate) state: DocumentState,
}

impl Document {
    /// Build a document from producer output.
    ///
    /// Drafts without an id are numbered after the largest explicit id, in
    /// input order. A missing original span is read from the base text.
    pub fn ingest(base_text: &str, drafts: Vec<SuggestionDraft>) -> Result<Self> {
        let text = Text::new(base_text);
        let suggestions = suggestions_from_drafts(&text, drafts)?;
        let index = SpanIndex::build(text.char_len(), suggestions)?;

        Ok(Self {
            base_text: text.clone(),
            state: DocumentState::new(text, index),
        })
    }

    /// The text as originally loaded, never modified
    pub fn base_text(&self) -> &Text {
        &self.base_text
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn text(&self) -> &Text {
        &self.state.text
    }
}

fn suggestions_from_drafts(text: &Text, drafts: Vec<SuggestionDraft>) -> Result<Vec<Suggestion>> {
    let max_id = drafts.iter().filter_map(|d| d.id).map(|id| id.0).max();
    // None once every id above the largest explicit one is taken
    let mut next_id = max_id.map_or(Some(1), |max| max.checked_add(1));

    drafts
        .into_iter()
        .map(|draft| {
            let id = match draft.id {
                Some(id) => id,
                None => {
                    let id = next_id.ok_or(RevisionError::IdSpaceExhausted {
                        start: draft.start,
                        end: draft.end,
                    })?;
                    next_id = id.checked_add(1);
                    SuggestionId(id)
                }
            };

            let (Ok(start), Ok(end)) = (usize::try_from(draft.start), usize::try_from(draft.end))
            else {
                return Err(RevisionError::InvalidRange {
                    id,
                    start: draft.start,
                    end: draft.end,
                    problem: RangeProblem::NegativeOffset,
                });
            };

            let original_span = draft
                .original_span
                .unwrap_or_else(|| text.slice(start..end));

            Ok(Suggestion {
                id,
                start,
                end,
                original_span,
                replacement_span: draft.replacement_span,
                reason: draft.reason,
                status: draft.status,
            })
        })
        .collect()
}
