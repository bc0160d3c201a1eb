//! Input format of the external suggestion producer.
//!
//! Producers emit loosely-typed JSON: ids may be missing, offsets may be
//! negative, and older producers name the spans `original_text` /
//! `improved_text`. Everything here only parses; range validation happens
//! when drafts are ingested into a [`Document`](crate::editing::Document).

use serde::Deserialize;

use crate::error::Result;
use crate::models::{SuggestionId, SuggestionStatus};

/// One suggestion as delivered by a producer, before validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDraft {
    #[serde(default)]
    pub id: Option<SuggestionId>,
    pub start: i64,
    pub end: i64,
    /// Filled from the text at `start..end` when absent
    #[serde(default, alias = "original_span", alias = "original_text")]
    pub original_span: Option<String>,
    #[serde(alias = "replacement_span", alias = "improved_text")]
    pub replacement_span: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: SuggestionStatus,
}

impl SuggestionDraft {
    pub fn new(start: i64, end: i64, replacement_span: impl Into<String>) -> Self {
        Self {
            id: None,
            start,
            end,
            original_span: None,
            replacement_span: replacement_span.into(),
            reason: String::new(),
            status: SuggestionStatus::Pending,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(SuggestionId(id));
        self
    }

    pub fn with_original(mut self, original_span: impl Into<String>) -> Self {
        self.original_span = Some(original_span.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_status(mut self, status: SuggestionStatus) -> Self {
        self.status = status;
        self
    }
}

/// A producer response: the suggestions and, optionally, the text they
/// were computed against
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBatch {
    #[serde(default, alias = "original_text")]
    pub original_text: Option<String>,
    pub suggestions: Vec<SuggestionDraft>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchShape {
    Bare(Vec<SuggestionDraft>),
    Wrapped(SuggestionBatch),
}

impl SuggestionBatch {
    /// Parse either a bare JSON array of drafts or an object with a
    /// `suggestions` field
    pub fn from_json(json: &str) -> Result<Self> {
        let batch = match serde_json::from_str(json)? {
            BatchShape::Bare(suggestions) => SuggestionBatch {
                original_text: None,
                suggestions,
            },
            BatchShape::Wrapped(batch) => batch,
        };
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevisionError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_bare_array() {
        let batch = SuggestionBatch::from_json(
            r#"[{"start": 8, "end": 11, "replacementSpan": "the", "reason": "typo"}]"#,
        )
        .unwrap();

        assert_eq!(batch.original_text, None);
        assert_eq!(
            batch.suggestions,
            vec![SuggestionDraft::new(8, 11, "the").with_reason("typo")]
        );
    }

    #[test]
    fn test_parses_producer_wire_names() {
        let json = r#"{
            "original_text": "This is teh improved text.",
            "suggestions": [{
                "id": 1,
                "start": 8,
                "end": 11,
                "original_text": "teh",
                "improved_text": "the",
                "reason": "Corrected potential typo or improved word choice",
                "status": "pending"
            }]
        }"#;

        let batch = SuggestionBatch::from_json(json).unwrap();

        assert_eq!(
            batch.original_text.as_deref(),
            Some("This is teh improved text.")
        );
        assert_eq!(
            batch.suggestions,
            vec![
                SuggestionDraft::new(8, 11, "the")
                    .with_id(1)
                    .with_original("teh")
                    .with_reason("Corrected potential typo or improved word choice")
            ]
        );
    }

    #[test]
    fn test_parses_camel_case_object() {
        let json = r#"{
            "originalText": "abc",
            "suggestions": [
                {"start": 0, "end": 1, "originalSpan": "a", "replacementSpan": "A", "status": "rejected"}
            ]
        }"#;

        let batch = SuggestionBatch::from_json(json).unwrap();

        assert_eq!(batch.original_text.as_deref(), Some("abc"));
        assert_eq!(batch.suggestions[0].status, SuggestionStatus::Rejected);
        assert_eq!(batch.suggestions[0].original_span.as_deref(), Some("a"));
    }

    #[test]
    fn test_negative_offsets_survive_parsing() {
        let batch =
            SuggestionBatch::from_json(r#"[{"start": -2, "end": 3, "replacementSpan": "x"}]"#)
                .unwrap();

        assert_eq!(batch.suggestions[0].start, -2);
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = SuggestionBatch::from_json(r#"{"suggestions": 12}"#).unwrap_err();

        assert!(matches!(err, RevisionError::MalformedBatch(_)));
    }
}
