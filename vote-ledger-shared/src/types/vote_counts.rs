use serde::{Deserialize, Serialize};

use crate::types::VoteKind;

/// The cached vote counters of a single question.
///
/// Field names match the JSON returned by the counts endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
    pub reports: i64,
}

impl VoteCounts {
    pub fn new(upvotes: i64, downvotes: i64, reports: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            reports,
        }
    }

    /// Returns the counter for `kind`.
    pub fn get(&self, kind: VoteKind) -> i64 {
        match kind {
            VoteKind::Upvote => self.upvotes,
            VoteKind::Downvote => self.downvotes,
            VoteKind::Report => self.reports,
        }
    }
}
