//! The submission gate: what a draft must satisfy before it becomes an
//! insert payload.

use crate::category::Category;
use crate::fact::NewFact;
use thiserror::Error;
use url::Url;

/// Maximum fact text length, in characters. Enforced at submission time
/// only; rows already in the store are never re-checked.
pub const MAX_FACT_TEXT_LEN: usize = 200;

/// A violated submission precondition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("fact text must not be empty")]
    EmptyText,

    #[error("fact text is {len} characters, limit is {MAX_FACT_TEXT_LEN}")]
    TextTooLong { len: usize },

    #[error("source must be an absolute http or https URL")]
    InvalidSource,

    #[error("a category must be chosen")]
    MissingCategory,
}

/// The form's editable state, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactDraft {
    pub text: String,
    pub source: String,
    pub category: Option<Category>,
}

impl FactDraft {
    /// Run the full precondition gate. Checks are ordered so the first
    /// failure reported is the field the user fills in first.
    pub fn validate(&self) -> Result<NewFact, SubmissionError> {
        if self.text.is_empty() {
            return Err(SubmissionError::EmptyText);
        }
        let len = self.text.chars().count();
        if len > MAX_FACT_TEXT_LEN {
            return Err(SubmissionError::TextTooLong { len });
        }
        if !is_valid_http_url(&self.source) {
            return Err(SubmissionError::InvalidSource);
        }
        let category = self.category.ok_or(SubmissionError::MissingCategory)?;
        Ok(NewFact {
            text: self.text.clone(),
            source: self.source.clone(),
            category,
        })
    }

    /// Characters still available in the text field. Saturates at zero
    /// once the limit is crossed.
    pub fn remaining_chars(&self) -> usize {
        MAX_FACT_TEXT_LEN.saturating_sub(self.text.chars().count())
    }
}

/// A source is valid only if it parses as an absolute URL whose scheme is
/// exactly `http` or `https`. Any parse failure or other scheme fails.
pub fn is_valid_http_url(source: &str) -> bool {
    match Url::parse(source) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> FactDraft {
        FactDraft {
            text: "Octopuses have three hearts.".to_string(),
            source: "https://example.com/octopus".to_string(),
            category: Some(Category::Science),
        }
    }

    #[test]
    fn test_valid_draft_produces_payload() {
        let new_fact = valid_draft().validate().unwrap();
        assert_eq!(new_fact.text, "Octopuses have three hearts.");
        assert_eq!(new_fact.category, Category::Science);
    }

    #[test]
    fn test_empty_text_rejected() {
        let mut draft = valid_draft();
        draft.text.clear();
        assert_eq!(draft.validate(), Err(SubmissionError::EmptyText));
    }

    #[test]
    fn test_text_over_limit_rejected() {
        let mut draft = valid_draft();
        draft.text = "x".repeat(MAX_FACT_TEXT_LEN + 1);
        assert_eq!(
            draft.validate(),
            Err(SubmissionError::TextTooLong {
                len: MAX_FACT_TEXT_LEN + 1
            })
        );
    }

    #[test]
    fn test_text_at_limit_accepted() {
        let mut draft = valid_draft();
        draft.text = "x".repeat(MAX_FACT_TEXT_LEN);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut draft = valid_draft();
        // 200 two-byte characters: within the limit even though the byte
        // length is 400.
        draft.text = "é".repeat(MAX_FACT_TEXT_LEN);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_bad_source_rejected() {
        let mut draft = valid_draft();
        draft.source = "ftp://example.com".to_string();
        assert_eq!(draft.validate(), Err(SubmissionError::InvalidSource));
    }

    #[test]
    fn test_missing_category_rejected() {
        let mut draft = valid_draft();
        draft.category = None;
        assert_eq!(draft.validate(), Err(SubmissionError::MissingCategory));
    }

    #[test]
    fn test_url_validator_vectors() {
        assert!(is_valid_http_url("https://example.com"));
        assert!(is_valid_http_url("http://example.com/path?q=1"));
        assert!(!is_valid_http_url("ftp://example.com"));
        assert!(!is_valid_http_url("not a url"));
        assert!(!is_valid_http_url(""));
    }

    #[test]
    fn test_remaining_chars_counts_down() {
        let mut draft = FactDraft::default();
        assert_eq!(draft.remaining_chars(), MAX_FACT_TEXT_LEN);
        draft.text = "abcd".to_string();
        assert_eq!(draft.remaining_chars(), MAX_FACT_TEXT_LEN - 4);
        draft.text = "x".repeat(MAX_FACT_TEXT_LEN + 50);
        assert_eq!(draft.remaining_chars(), 0);
    }
}
