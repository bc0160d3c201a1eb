use std::collections::HashSet;

use crate::error::{RangeProblem, Result, RevisionError};
use crate::models::{Suggestion, SuggestionId};

/// Suggestions of one document ordered by `(start, id)`.
///
/// The index is always rebuilt from a complete set rather than patched in
/// place, and it refuses any set whose pending members are malformed or
/// overlap. Resolved suggestions keep their frozen offsets and are not
/// range-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanIndex {
    pub(crate) entries: Vec<Suggestion>,
}

impl SpanIndex {
    /// Validate `suggestions` against a text of `text_len` characters and
    /// index them
    pub fn build(text_len: usize, mut suggestions: Vec<Suggestion>) -> Result<Self> {
        suggestions.sort_by_key(|s| (s.start, s.id));
        validate(text_len, &suggestions)?;
        Ok(Self {
            entries: suggestions,
        })
    }

    /// Swap in a full replacement set. On error the index is unchanged.
    pub fn replace(&mut self, text_len: usize, suggestions: Vec<Suggestion>) -> Result<()> {
        *self = Self::build(text_len, suggestions)?;
        Ok(())
    }

    /// All suggestions in rendering order: start ascending, ties by id.
    /// Clone the iterator to walk it again.
    pub fn sorted(&self) -> std::slice::Iter<'_, Suggestion> {
        self.entries.iter()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Suggestion> + Clone {
        self.entries.iter().filter(|s| s.is_pending())
    }

    pub fn get(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// The pending suggestion whose span contains character `offset`
    pub fn containing(&self, offset: usize) -> Option<&Suggestion> {
        self.pending()
            .take_while(|s| s.start <= offset)
            .find(|s| offset < s.end)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn to_vec(&self) -> Vec<Suggestion> {
        self.entries.clone()
    }
}

fn validate(text_len: usize, sorted: &[Suggestion]) -> Result<()> {
    let mut seen = HashSet::with_capacity(sorted.len());
    if let Some(duplicate) = sorted.iter().find(|s| !seen.insert(s.id)) {
        return Err(RevisionError::DuplicateId(duplicate.id));
    }

    // Pending spans are sorted by start, so each one only needs checking
    // against the previous pending span.
    let mut previous: Option<&Suggestion> = None;
    for suggestion in sorted.iter().filter(|s| s.is_pending()) {
        if suggestion.start >= suggestion.end {
            return Err(invalid(suggestion, RangeProblem::EmptyOrReversed));
        }
        if suggestion.end > text_len {
            return Err(invalid(suggestion, RangeProblem::PastEnd { len: text_len }));
        }
        if let Some(prev) = previous
            && prev.end > suggestion.start
        {
            return Err(invalid(suggestion, RangeProblem::Overlaps(prev.id)));
        }
        previous = Some(suggestion);
    }

    Ok(())
}

fn invalid(suggestion: &Suggestion, problem: RangeProblem) -> RevisionError {
    RevisionError::InvalidRange {
        id: suggestion.id,
        start: signed(suggestion.start),
        end: signed(suggestion.end),
        problem,
    }
}

fn signed(offset: usize) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}
