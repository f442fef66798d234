use serde::{Deserialize, Serialize};

use crate::types::{QuestionId, UserId, VoteKind};

/// What a single toggle did to a (user, question, kind) membership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteToggle {
    /// The vote was absent and has been recorded.
    Cast,
    /// The vote was present and has been removed.
    Withdrawn,
}

/// One processed occurrence of a vote kind within a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindToggle {
    pub kind: VoteKind,
    pub toggle: VoteToggle,
}

/// Acknowledgement returned by a committed `apply_votes` call.
///
/// `toggles` holds one entry per requested kind occurrence, in request order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyReceipt {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub toggles: Vec<KindToggle>,
}

impl ApplyReceipt {
    /// Kinds processed by the batch, in request order.
    pub fn kinds(&self) -> impl Iterator<Item = VoteKind> + '_ {
        self.toggles.iter().map(|t| t.kind)
    }

    /// User-facing acknowledgement, e.g. `"Downvote, Report processed successfully!"`.
    pub fn message(&self) -> String {
        let labels: Vec<&str> = self.kinds().map(VoteKind::label).collect();
        format!("{} processed successfully!", labels.join(", "))
    }
}
