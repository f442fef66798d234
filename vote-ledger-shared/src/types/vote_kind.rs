use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user's reaction to a question.
///
/// Every kind maps to exactly one counter column on the `questions` table and
/// one `vote_type` value in `user_votes`, see [`VoteKind::counter_column`] and
/// [`VoteKind::as_str`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
    Report,
}

/// Static per-kind metadata: (wire name, label, counter column).
struct KindSpec {
    name: &'static str,
    label: &'static str,
    counter_column: &'static str,
}

const KIND_SPECS: [KindSpec; 3] = [
    KindSpec {
        name: "upvote",
        label: "Upvote",
        counter_column: "upvotes",
    },
    KindSpec {
        name: "downvote",
        label: "Downvote",
        counter_column: "downvotes",
    },
    KindSpec {
        name: "report",
        label: "Report",
        counter_column: "reports",
    },
];

impl VoteKind {
    /// All kinds in canonical order.
    pub const ALL: [VoteKind; 3] = [VoteKind::Upvote, VoteKind::Downvote, VoteKind::Report];

    fn spec(self) -> &'static KindSpec {
        &KIND_SPECS[self as usize]
    }

    /// The value stored in `user_votes.vote_type`.
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Capitalized name used in user-facing messages.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// The `questions` column caching the number of votes of this kind.
    pub fn counter_column(self) -> &'static str {
        self.spec().counter_column
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `upvote`, `downvote` or `report`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid vote kind: {0}")]
pub struct ParseVoteKindError(pub String);

impl FromStr for VoteKind {
    type Err = ParseVoteKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseVoteKindError(s.to_string()))
    }
}
