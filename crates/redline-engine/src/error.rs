use crate::models::{SuggestionId, SuggestionStatus};

/// Why a suggestion's range was rejected on ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeProblem {
    #[error("offset is negative")]
    NegativeOffset,
    #[error("range is empty or reversed")]
    EmptyOrReversed,
    #[error("end is past the text length {len}")]
    PastEnd { len: usize },
    #[error("overlaps pending suggestion {0}")]
    Overlaps(SuggestionId),
}

/// Every recoverable failure the revision engine reports.
///
/// None of these are fatal: the session that returns one is left exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevisionError {
    #[error("suggestion {id} has invalid range {start}..{end}: {problem}")]
    InvalidRange {
        id: SuggestionId,
        start: i64,
        end: i64,
        problem: RangeProblem,
    },
    #[error("duplicate suggestion id {0}")]
    DuplicateId(SuggestionId),
    #[error("suggestion {0} not found")]
    NotFound(SuggestionId),
    #[error("suggestion {id} is already {status}")]
    AlreadyResolved {
        id: SuggestionId,
        status: SuggestionStatus,
    },
    #[error("no suggestion id left for draft at {start}..{end}")]
    IdSpaceExhausted { start: i64, end: i64 },
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("malformed suggestion batch: {0}")]
    MalformedBatch(String),
}

impl From<serde_json::Error> for RevisionError {
    fn from(err: serde_json::Error) -> Self {
        RevisionError::MalformedBatch(err.to_string())
    }
}

pub type Result<T, E = RevisionError> = std::result::Result<T, E>;
