/*!
 * # Revision Engine
 *
 * Lets a user accept or reject suggested replacements of spans of a text,
 * one at a time, with exact undo/redo of every decision.
 *
 * ## Architecture Overview
 *
 * ### 1. Value-Type State
 * - A document's mutable state is a [`DocumentState`]: the current [`Text`]
 *   and a [`SpanIndex`] of all suggestions
 * - `Text` is an xi-rope buffer addressed by character offsets; clones share
 *   structure, so snapshots are cheap and fully independent
 *
 * ### 2. Position-Anchored Patching
 * - [`apply_resolution`] splices the target's span by position, never by
 *   searching for its text
 * - Every other pending suggestion is re-anchored against the new text
 * - The input state is never touched; a failed resolution leaves nothing
 *   half-applied
 *
 * ### 3. Snapshot History
 * - [`RevisionHistory`] keeps the state from before each mutation on a
 *   past stack, and undone states on a future stack
 * - Undo followed by redo restores the exact same snapshot
 * - A new mutation clears the future stack
 *
 * ### 4. Session Facade
 * - [`SuggestionSession`] owns one [`Document`] and its history and is the
 *   only entry point the presentation layer uses
 * - Reads go through [`DocumentView`](crate::models::DocumentView), plain
 *   data with undo/redo capability flags
 *
 * ## Usage Pattern
 *
 * ```rust
 * use redline_engine::{SuggestionDraft, SuggestionId, SuggestionSession};
 *
 * let mut session = SuggestionSession::new(
 *     "This is teh improved text.",
 *     vec![SuggestionDraft::new(8, 11, "the").with_reason("typo")],
 * )
 * .unwrap();
 *
 * let view = session.accept(SuggestionId(1)).unwrap();
 * assert_eq!(view.current_text, "This is the improved text.");
 *
 * let view = session.undo().unwrap();
 * assert_eq!(view.current_text, "This is teh improved text.");
 * assert!(view.can_redo);
 * ```
 */

// Module exports
pub mod document;
pub mod history;
pub mod patch;
pub mod session;
pub mod span_index;
pub mod text;

// Public API re-exports
pub use document::{Document, DocumentState};
pub use history::RevisionHistory;
pub use patch::{Patch, apply_resolution};
pub use session::SuggestionSession;
pub use span_index::SpanIndex;
pub use text::Text;
