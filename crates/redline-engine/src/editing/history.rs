use std::collections::VecDeque;

use crate::error::{Result, RevisionError};

/// Two-stack undo/redo ledger of complete state snapshots.
///
/// `past` holds the states that existed before each recorded mutation,
/// most recent at the back. `future` holds states that were undone, most
/// recent at the back. Any freshly recorded mutation clears `future`.
///
/// With a limit set, the oldest `past` entries are evicted once the limit
/// is exceeded. A limit of zero keeps no history at all.
#[derive(Debug, Clone)]
pub struct RevisionHistory<S> {
    past: VecDeque<S>,
    future: Vec<S>,
    limit: Option<usize>,
}

impl<S> Default for RevisionHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RevisionHistory<S> {
    /// Unbounded history
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Record the state that existed right before a new mutation
    pub fn record(&mut self, before: S) {
        self.past.push_back(before);
        self.future.clear();
        self.enforce_limit();
    }

    /// Step back: `current` moves onto the redo stack and the most recent
    /// recorded state is returned to become current
    pub fn undo(&mut self, current: S) -> Result<S> {
        let previous = self.past.pop_back().ok_or(RevisionError::NothingToUndo)?;
        self.future.push(current);
        Ok(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: S) -> Result<S> {
        let next = self.future.pop().ok_or(RevisionError::NothingToRedo)?;
        self.past.push_back(current);
        self.enforce_limit();
        Ok(next)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.past.len() > limit {
            self.past.pop_front();
            log::debug!("history limit {limit} reached, evicted oldest undo entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_history_reports_nothing_to_do() {
        let mut history: RevisionHistory<&str> = RevisionHistory::new();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo("now"), Err(RevisionError::NothingToUndo));
        assert_eq!(history.redo("now"), Err(RevisionError::NothingToRedo));
    }

    #[test]
    fn test_undo_returns_recorded_state_and_redo_restores_current() {
        let mut history = RevisionHistory::new();
        history.record("v0");

        assert_eq!(history.undo("v1"), Ok("v0"));
        assert!(history.can_redo());
        assert_eq!(history.redo("v0"), Ok("v1"));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_multiple_steps_unwind_in_order() {
        let mut history = RevisionHistory::new();
        history.record(0);
        history.record(1);
        history.record(2);

        let mut current = 3;
        let mut seen = Vec::new();
        while let Ok(previous) = history.undo(current) {
            seen.push(previous);
            current = previous;
        }

        assert_eq!(seen, vec![2, 1, 0]);
        assert_eq!(history.redo_len(), 3);
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = RevisionHistory::new();
        history.record("a");
        let _ = history.undo("b");
        assert!(history.can_redo());

        history.record("a");

        assert!(!history.can_redo());
        assert_eq!(history.redo("c"), Err(RevisionError::NothingToRedo));
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = RevisionHistory::with_limit(Some(2));
        history.record(1);
        history.record(2);
        history.record(3);

        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo(4), Ok(3));
        assert_eq!(history.undo(3), Ok(2));
        assert_eq!(history.undo(2), Err(RevisionError::NothingToUndo));
    }

    #[test]
    fn test_zero_limit_disables_undo() {
        let mut history = RevisionHistory::with_limit(Some(0));
        history.record("before");

        assert!(!history.can_undo());
    }

    #[test]
    fn test_clear_drops_both_stacks() {
        let mut history = RevisionHistory::new();
        history.record(1);
        history.record(2);
        let _ = history.undo(3);

        history.clear();

        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 0);
    }
}
