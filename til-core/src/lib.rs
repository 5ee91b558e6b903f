//! TIL Core - Fact Feed Types
//!
//! Data types and submission validation shared by every TIL client.
//! The remote store assigns identifiers and counters; this crate only
//! describes the rows and gates what may be inserted.

pub mod category;
pub mod fact;
pub mod submission;

pub use category::{Category, CategoryFilter};
pub use fact::{Fact, FactId, NewFact, VoteKind};
pub use submission::{is_valid_http_url, FactDraft, SubmissionError, MAX_FACT_TEXT_LEN};
