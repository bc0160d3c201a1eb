use std::ops::Range;

use crate::editing::{DocumentState, SpanIndex};
use crate::error::{Result, RevisionError};
use crate::models::{Decision, Suggestion, SuggestionId};

/// Result of resolving one suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub target: SuggestionId,
    pub decision: Decision,
    /// Character range in the new text now holding the written span
    pub changed: Range<usize>,
    /// Length change of the text, in characters
    pub delta: isize,
    /// Pending suggestions that overlapped the target and were discarded
    pub dropped: Vec<SuggestionId>,
}

/// Resolve suggestion `id` against `state` and return the resulting state.
///
/// The splice is anchored on the target's position, never on searching for
/// its text, so identical text elsewhere in the document is left alone.
/// Accepting writes `replacement_span`; rejecting writes `original_span`
/// back, which only changes the text if it had drifted. Pending
/// suggestions after the target shift by the length difference, those
/// before it stay put, and any that overlap it are dropped with a warning.
///
/// `state` is never modified: on error the caller still holds the
/// untouched original.
pub fn apply_resolution(
    state: &DocumentState,
    id: SuggestionId,
    decision: Decision,
) -> Result<(DocumentState, Patch)> {
    let target = state.index.get(id).ok_or(RevisionError::NotFound(id))?;
    if !target.is_pending() {
        return Err(RevisionError::AlreadyResolved {
            id,
            status: target.status,
        });
    }

    let span = target.range();
    let new_span = match decision {
        Decision::Accept => &target.replacement_span,
        Decision::Reject => &target.original_span,
    };
    let old_span = state.text.slice(span.clone());
    let new_len = new_span.chars().count();
    let delta = char_delta(new_len, span.len());

    let text = if old_span == *new_span {
        state.text.clone()
    } else {
        state.text.splice(span.clone(), new_span)
    };

    let mut dropped = Vec::new();
    let mut suggestions = Vec::with_capacity(state.index.len());
    for suggestion in state.index.sorted() {
        if suggestion.id == id {
            suggestions.push(Suggestion {
                status: decision.status(),
                ..suggestion.clone()
            });
        } else if !suggestion.is_pending() || suggestion.end <= span.start {
            suggestions.push(suggestion.clone());
        } else if suggestion.start >= span.end {
            suggestions.push(Suggestion {
                start: suggestion.start.saturating_add_signed(delta),
                end: suggestion.end.saturating_add_signed(delta),
                ..suggestion.clone()
            });
        } else {
            log::warn!(
                "dropping suggestion {} at {}..{}: overlaps resolved suggestion {} at {}..{}",
                suggestion.id,
                suggestion.start,
                suggestion.end,
                id,
                span.start,
                span.end
            );
            dropped.push(suggestion.id);
        }
    }

    let index = SpanIndex::build(text.char_len(), suggestions)?;
    log::debug!(
        "{decision:?} {id} at {}..{} (delta {delta}, dropped {})",
        span.start,
        span.end,
        dropped.len()
    );

    let patch = Patch {
        target: id,
        decision,
        changed: span.start..span.start + new_len,
        delta,
        dropped,
    };
    Ok((DocumentState::new(text, index), patch))
}

fn char_delta(new_len: usize, old_len: usize) -> isize {
    if new_len >= old_len {
        isize::try_from(new_len - old_len).unwrap_or(isize::MAX)
    } else {
        isize::try_from(old_len - new_len).map_or(isize::MIN, |d| -d)
    }
}
