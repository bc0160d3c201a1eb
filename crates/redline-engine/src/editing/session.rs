use uuid::Uuid;

use crate::editing::{
    Document, DocumentState, Patch, RevisionHistory, Text, apply_resolution,
};
use crate::error::Result;
use crate::models::{Decision, DocumentView, Suggestion, SuggestionId};
use crate::producer::SuggestionDraft;

/// Owner of one document under review and its undo/redo history.
///
/// Every mutating call either completes or returns an error with the
/// session untouched; history only ever records real mutations. The session
/// is single-writer: a host serving several triggers must serialize calls.
#[derive(Debug, Clone)]
pub struct SuggestionSession {
    id: Uuid,
    document: Document,
    history: RevisionHistory<DocumentState>,
    revision: u64,
    last_patches: Vec<Patch>,
}

impl SuggestionSession {
    /// Start a session with unbounded history
    pub fn new(base_text: &str, drafts: Vec<SuggestionDraft>) -> Result<Self> {
        Self::with_history_limit(base_text, drafts, None)
    }

    pub fn with_history_limit(
        base_text: &str,
        drafts: Vec<SuggestionDraft>,
        limit: Option<usize>,
    ) -> Result<Self> {
        let document = Document::ingest(base_text, drafts)?;
        let id = Uuid::new_v4();
        log::debug!(
            "session {id} opened with {} suggestions, {} pending",
            document.state().index().len(),
            document.state().index().pending_count()
        );

        Ok(Self {
            id,
            document,
            history: RevisionHistory::with_limit(limit),
            revision: 0,
            last_patches: Vec::new(),
        })
    }

    /// Accept or reject one pending suggestion
    pub fn resolve(&mut self, id: SuggestionId, decision: Decision) -> Result<DocumentView> {
        let (state, patch) = apply_resolution(&self.document.state, id, decision)?;
        self.commit(state, vec![patch]);
        Ok(self.current_view())
    }

    pub fn accept(&mut self, id: SuggestionId) -> Result<DocumentView> {
        self.resolve(id, Decision::Accept)
    }

    pub fn reject(&mut self, id: SuggestionId) -> Result<DocumentView> {
        self.resolve(id, Decision::Reject)
    }

    /// Resolve every pending suggestion as one undoable step. With nothing
    /// pending the text and history are untouched and `last_patches` is
    /// left empty.
    pub fn resolve_all(&mut self, decision: Decision) -> Result<DocumentView> {
        let (state, patches) = resolve_pending(&self.document.state, decision)?;
        if patches.is_empty() {
            self.last_patches.clear();
        } else {
            self.commit(state, patches);
        }
        Ok(self.current_view())
    }

    /// The text `resolve_all(decision)` would produce, without applying it
    pub fn preview(&self, decision: Decision) -> Result<String> {
        let (state, _) = resolve_pending(&self.document.state, decision)?;
        Ok(state.text.to_string())
    }

    pub fn undo(&mut self) -> Result<DocumentView> {
        let previous = self.history.undo(self.document.state.clone())?;
        self.restore(previous);
        log::debug!("session {} undo, revision {}", self.id, self.revision);
        Ok(self.current_view())
    }

    pub fn redo(&mut self) -> Result<DocumentView> {
        let next = self.history.redo(self.document.state.clone())?;
        self.restore(next);
        log::debug!("session {} redo, revision {}", self.id, self.revision);
        Ok(self.current_view())
    }

    /// Replace the document with a new base text and suggestion set,
    /// discarding all history. On error the current document is kept.
    pub fn reset(&mut self, base_text: &str, drafts: Vec<SuggestionDraft>) -> Result<DocumentView> {
        let document = Document::ingest(base_text, drafts)?;
        self.document = document;
        self.history.clear();
        self.last_patches.clear();
        self.revision += 1;
        log::debug!("session {} reset, revision {}", self.id, self.revision);
        Ok(self.current_view())
    }

    pub fn current_view(&self) -> DocumentView {
        DocumentView {
            session_id: self.id,
            revision: self.revision,
            base_text: self.document.base_text().to_string(),
            current_text: self.document.text().to_string(),
            suggestions: self.document.state.index.to_vec(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> &Text {
        self.document.text()
    }

    pub fn base_text(&self) -> &Text {
        self.document.base_text()
    }

    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.document.state.suggestion(id)
    }

    /// The pending suggestion covering character `offset` of the current text
    pub fn suggestion_at(&self, offset: usize) -> Option<&Suggestion> {
        self.document.state.index.containing(offset)
    }

    pub fn suggestions(&self) -> std::slice::Iter<'_, Suggestion> {
        self.document.state.index.sorted()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history.limit()
    }

    /// Patches produced by the most recent resolve or resolve-all; empty
    /// after undo, redo, reset or a resolve-all with nothing pending
    pub fn last_patches(&self) -> &[Patch] {
        &self.last_patches
    }

    fn commit(&mut self, state: DocumentState, patches: Vec<Patch>) {
        let before = std::mem::replace(&mut self.document.state, state);
        self.history.record(before);
        self.last_patches = patches;
        self.revision += 1;
    }

    fn restore(&mut self, state: DocumentState) {
        self.document.state = state;
        self.last_patches.clear();
        self.revision += 1;
    }
}

/// Resolve all pending suggestions of `state` in position order
fn resolve_pending(state: &DocumentState, decision: Decision) -> Result<(DocumentState, Vec<Patch>)> {
    let targets: Vec<SuggestionId> = state.index.pending().map(|s| s.id).collect();
    let mut current = state.clone();
    let mut patches = Vec::with_capacity(targets.len());

    for id in targets {
        // An earlier resolution may have dropped an overlapping target
        if !current.suggestion(id).is_some_and(Suggestion::is_pending) {
            continue;
        }
        let (next, patch) = apply_resolution(&current, id, decision)?;
        current = next;
        patches.push(patch);
    }

    Ok((current, patches))
}
