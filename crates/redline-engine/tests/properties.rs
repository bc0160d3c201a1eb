use proptest::prelude::*;
use redline_engine::{
    Decision, DocumentState, RevisionError, SpanIndex, Suggestion, SuggestionDraft,
    SuggestionSession,
};

/// Lay out non-overlapping drafts left to right over a text of `len` chars
fn drafts_from_layout(len: usize, layout: &[(usize, usize, String)]) -> Vec<SuggestionDraft> {
    let mut cursor = 0;
    let mut drafts = Vec::new();
    for (gap, width, replacement) in layout {
        let start = cursor + gap;
        let end = start + width;
        if end > len {
            break;
        }
        drafts.push(SuggestionDraft::new(start as i64, end as i64, replacement.clone()));
        cursor = end;
    }
    drafts
}

fn session_strategy() -> impl Strategy<Value = SuggestionSession> {
    (
        "[a-z é]{20,60}",
        prop::collection::vec((0usize..4, 1usize..5, "[A-Z]{0,6}"), 0..8),
    )
        .prop_map(|(text, layout)| {
            let drafts = drafts_from_layout(text.chars().count(), &layout);
            SuggestionSession::new(&text, drafts).unwrap()
        })
}

fn apply_decisions(
    session: &mut SuggestionSession,
    picks: &[(prop::sample::Index, bool)],
) -> Vec<DocumentState> {
    let mut states = vec![session.document().state().clone()];
    for (pick, accept) in picks {
        let pending: Vec<_> = session.document().state().index().pending().map(|s| s.id).collect();
        if pending.is_empty() {
            break;
        }
        let id = pending[pick.index(pending.len())];
        let decision = if *accept { Decision::Accept } else { Decision::Reject };
        session.resolve(id, decision).unwrap();
        states.push(session.document().state().clone());
    }
    states
}

proptest! {
    #[test]
    fn undo_redo_inverse_law(
        mut session in session_strategy(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 1..10),
    ) {
        let states = apply_decisions(&mut session, &picks);
        let steps = states.len() - 1;
        let initial = states.first().unwrap().clone();
        let last = states.last().unwrap().clone();

        for expected in states.iter().rev().skip(1) {
            session.undo().unwrap();
            prop_assert_eq!(session.document().state(), expected);
        }
        prop_assert_eq!(session.document().state(), &initial);
        prop_assert_eq!(session.undo().unwrap_err(), RevisionError::NothingToUndo);

        for _ in 0..steps {
            session.redo().unwrap();
        }
        prop_assert_eq!(session.document().state(), &last);
        prop_assert_eq!(session.redo().unwrap_err(), RevisionError::NothingToRedo);
    }

    #[test]
    fn pending_spans_keep_their_text(
        mut session in session_strategy(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 1..10),
    ) {
        apply_decisions(&mut session, &picks);

        let state = session.document().state();
        for suggestion in state.index().pending() {
            prop_assert_eq!(state.text().slice(suggestion.range()), suggestion.original_span.clone());
        }
    }

    #[test]
    fn index_accepts_exactly_non_overlapping_sets(
        ranges in prop::collection::vec((0usize..30, 1usize..6), 0..6),
    ) {
        let suggestions: Vec<Suggestion> = ranges
            .iter()
            .enumerate()
            .map(|(i, (start, width))| Suggestion::new(i as u64 + 1, *start..start + width, "", "x"))
            .collect();
        let overlapping = suggestions.iter().enumerate().any(|(i, a)| {
            suggestions.iter().skip(i + 1).any(|b| a.overlaps(b))
        });

        let result = SpanIndex::build(40, suggestions);

        if overlapping {
            let is_invalid_range = matches!(result, Err(RevisionError::InvalidRange { .. }));
            prop_assert!(is_invalid_range);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
