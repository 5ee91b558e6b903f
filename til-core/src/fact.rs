//! Fact records as the store returns them, plus the insert payload and
//! the closed vote-counter enumeration.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned row identifier. Immutable and unique within a feed.
pub type FactId = i64;

/// One row of the facts table. Field names on the wire follow the store's
/// columns, which use camelCase for the counters and the creation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub id: FactId,
    pub text: String,
    pub source: String,
    pub category: Category,
    #[serde(rename = "votesInteresting")]
    pub votes_interesting: u32,
    #[serde(rename = "votesMindblowing")]
    pub votes_mindblowing: u32,
    #[serde(rename = "votesFalse")]
    pub votes_false: u32,
    #[serde(rename = "createdIn")]
    pub created_in: i32,
}

impl Fact {
    pub fn vote_count(&self, kind: VoteKind) -> u32 {
        match kind {
            VoteKind::Interesting => self.votes_interesting,
            VoteKind::Mindblowing => self.votes_mindblowing,
            VoteKind::False => self.votes_false,
        }
    }
}

/// Insert payload. The store assigns the id, zeroes the three counters,
/// and stamps the creation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFact {
    pub text: String,
    pub source: String,
    pub category: Category,
}

/// The three fixed vote counters. Each maps explicitly to its store
/// column; no free-form column name ever reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Interesting,
    Mindblowing,
    False,
}

impl VoteKind {
    pub const ALL: [VoteKind; 3] = [VoteKind::Interesting, VoteKind::Mindblowing, VoteKind::False];

    /// Store column holding this counter.
    pub fn column(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "votesInteresting",
            VoteKind::Mindblowing => "votesMindblowing",
            VoteKind::False => "votesFalse",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "interesting",
            VoteKind::Mindblowing => "mindblowing",
            VoteKind::False => "false",
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
