use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Stable identifier of a suggestion for the lifetime of its document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SuggestionId(pub u64);

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for SuggestionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lifecycle of a suggestion. Only `Pending` suggestions take part in
/// re-anchoring; the other two are frozen history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Accepted => "accepted",
            SuggestionStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// A user's verdict on a pending suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// The status a suggestion ends up in once this decision is applied
    pub fn status(self) -> SuggestionStatus {
        match self {
            Decision::Accept => SuggestionStatus::Accepted,
            Decision::Reject => SuggestionStatus::Rejected,
        }
    }
}

/// A proposed replacement of the half-open character range `start..end`
/// of the current text.
///
/// While pending, `start`/`end` always point into the document's current
/// text. After resolution they stay at the values used for the splice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: SuggestionId,
    pub start: usize,
    pub end: usize,
    pub original_span: String,
    pub replacement_span: String,
    pub reason: String,
    pub status: SuggestionStatus,
}

impl Suggestion {
    pub fn new(
        id: u64,
        range: Range<usize>,
        original_span: impl Into<String>,
        replacement_span: impl Into<String>,
    ) -> Self {
        Self {
            id: SuggestionId(id),
            start: range.start,
            end: range.end,
            original_span: original_span.into(),
            replacement_span: replacement_span.into(),
            reason: String::new(),
            status: SuggestionStatus::Pending,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_pending(&self) -> bool {
        self.status == SuggestionStatus::Pending
    }

    /// Whether two suggestions claim any character in common
    pub fn overlaps(&self, other: &Suggestion) -> bool {
        self.start < other.end && other.start < self.end
    }
}
