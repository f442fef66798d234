mod apply_receipt;
mod vote_counts;
mod vote_kind;

pub use apply_receipt::{ApplyReceipt, KindToggle, VoteToggle};
pub use vote_counts::VoteCounts;
pub use vote_kind::{ParseVoteKindError, VoteKind};

/// Identifier of a row in the `users` table.
pub type UserId = i64;

/// Identifier of a row in the `questions` table.
pub type QuestionId = i64;
