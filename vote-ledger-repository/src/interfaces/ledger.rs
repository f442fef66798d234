//! This module defines the `VoteLedger` trait, the only writer of vote
//! membership rows and of the cached vote counters on questions.
use vote_ledger_shared::types::{ApplyReceipt, QuestionId, UserId, VoteCounts, VoteKind};

use crate::errors::LedgerError;

/// A trait that defines the interface for recording votes on questions.
///
/// Each (user, question, kind) membership is a toggle: applying a kind that
/// is absent records it, applying it again removes it. The counters on the
/// question always equal the number of recorded votes of each kind.
#[async_trait::async_trait]
pub trait VoteLedger: Send + Sync {
    /// Toggles every kind in `kinds`, in order, as a single atomic unit.
    ///
    /// Duplicate kinds toggle once per occurrence.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The voting user
    /// * `question_id` - The question being voted on
    /// * `kinds` - Non-empty sequence of kinds to toggle
    ///
    /// # Returns
    ///
    /// * `Ok(ApplyReceipt)` - All toggles committed
    /// * `Err(LedgerError)` - Nothing was changed
    async fn apply_votes(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        kinds: &[VoteKind],
    ) -> Result<ApplyReceipt, LedgerError>;

    /// Returns the cached counters of a question, or `None` if it does not exist.
    async fn get_counts(&self, question_id: QuestionId) -> Result<Option<VoteCounts>, LedgerError>;

    /// Returns the kinds currently recorded for the pair, in canonical order.
    async fn get_user_votes(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Vec<VoteKind>, LedgerError>;
}
