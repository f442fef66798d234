//! SQLite implementation of the `VoteLedger` trait.
//!
//! Provides the transactional toggle engine behind the vote endpoints.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::SqlitePool`
//! - One transaction per batch, rolled back on drop for every early return
//! - Write lock taken by the first statement, so each batch's
//!   check-then-write sequence is isolated from concurrent writers
//! - Bounded lock wait through SQLite's busy timeout
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, instrument, warn};
use vote_ledger_shared::types::{
    ApplyReceipt, KindToggle, QuestionId, UserId, VoteCounts, VoteKind, VoteToggle,
};

use crate::sqlite::LedgerConfig;
use crate::{LedgerError, VoteLedger};

type SqliteTx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;

/// SQLite implementation of the vote ledger.
///
/// Cheap to share behind an `Arc`; all state lives in the pool.
pub struct SqliteVoteLedger {
    pool: SqlitePool,
}

impl SqliteVoteLedger {
    /// Wraps an existing pool.
    ///
    /// The pool must point at a database with the ledger schema applied and
    /// foreign keys enabled (the `sqlx` default for SQLite).
    pub async fn new(pool: SqlitePool) -> Result<Self, LedgerError> {
        Ok(Self { pool })
    }

    /// Opens a pool from `config` and wraps it.
    ///
    /// Connections use WAL journaling, enforce foreign keys and wait at most
    /// `config.busy_timeout` for a contended lock.
    pub async fn connect(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.busy_timeout)
            .connect_with(options)
            .await?;

        Self::new(pool).await
    }

    /// Applies the embedded bootstrap schema.
    pub async fn migrate(&self) -> Result<(), LedgerError> {
        sqlx::migrate!("src/sqlite/migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Takes the write lock by touching the question row.
    ///
    /// Must be the first statement of the transaction: SQLite only applies the
    /// busy timeout to a lock request made before the transaction has read
    /// anything.
    async fn claim_question_tx(
        &self,
        question_id: QuestionId,
        tx: &mut SqliteTx<'_>,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query("UPDATE questions SET upvotes = upvotes WHERE id = ?")
            .bind(question_id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::QuestionNotFound(question_id));
        }
        Ok(())
    }

    /// Flips one (user, question, kind) membership and adjusts its counter.
    async fn toggle_vote_tx(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        kind: VoteKind,
        tx: &mut SqliteTx<'_>,
    ) -> Result<VoteToggle, LedgerError> {
        let removed = sqlx::query(
            "DELETE FROM user_votes WHERE user_id = ? AND question_id = ? AND vote_type = ?",
        )
        .bind(user_id)
        .bind(question_id)
        .bind(kind.as_str())
        .execute(&mut **tx)
        .await?
        .rows_affected();

        let toggle = if removed > 0 {
            VoteToggle::Withdrawn
        } else {
            sqlx::query("INSERT INTO user_votes (user_id, question_id, vote_type) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(question_id)
                .bind(kind.as_str())
                .execute(&mut **tx)
                .await?;
            VoteToggle::Cast
        };

        let delta: i64 = match toggle {
            VoteToggle::Cast => 1,
            VoteToggle::Withdrawn => -1,
        };
        self.adjust_counter_tx(question_id, kind, delta, tx).await?;

        Ok(toggle)
    }

    async fn adjust_counter_tx(
        &self,
        question_id: QuestionId,
        kind: VoteKind,
        delta: i64,
        tx: &mut SqliteTx<'_>,
    ) -> Result<(), LedgerError> {
        // Column names come from the static kind table, never from input.
        let column = kind.counter_column();
        let sql = format!("UPDATE questions SET {column} = {column} + ? WHERE id = ?");

        sqlx::query(&sql)
            .bind(delta)
            .bind(question_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn apply_batch(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        kinds: &[VoteKind],
    ) -> Result<ApplyReceipt, LedgerError> {
        let mut tx = self.pool.begin().await?;
        self.claim_question_tx(question_id, &mut tx).await?;

        let mut toggles = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let toggle = self.toggle_vote_tx(user_id, question_id, kind, &mut tx).await?;
            toggles.push(KindToggle { kind, toggle });
        }

        tx.commit().await?;

        Ok(ApplyReceipt {
            user_id,
            question_id,
            toggles,
        })
    }
}

#[async_trait]
impl VoteLedger for SqliteVoteLedger {
    /// Applies a batch of toggles in one transaction.
    ///
    /// Any failure drops the transaction before commit, which rolls back
    /// every toggle of the batch.
    #[instrument(skip(self), level = "debug")]
    async fn apply_votes(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        kinds: &[VoteKind],
    ) -> Result<ApplyReceipt, LedgerError> {
        if kinds.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }

        match self.apply_batch(user_id, question_id, kinds).await {
            Ok(receipt) => {
                debug!(toggles = ?receipt.toggles, "Vote batch committed");
                Ok(receipt)
            }
            Err(e) => {
                if e.is_retryable() {
                    warn!(error = %e, "Vote batch rolled back on lock contention");
                } else {
                    debug!(error = %e, "Vote batch rolled back");
                }
                Err(e)
            }
        }
    }

    async fn get_counts(&self, question_id: QuestionId) -> Result<Option<VoteCounts>, LedgerError> {
        let row: Option<(i64, i64, i64)> =
            sqlx::query_as("SELECT upvotes, downvotes, reports FROM questions WHERE id = ?")
                .bind(question_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(upvotes, downvotes, reports)| VoteCounts::new(upvotes, downvotes, reports)))
    }

    async fn get_user_votes(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Vec<VoteKind>, LedgerError> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT vote_type FROM user_votes WHERE user_id = ? AND question_id = ?",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        let mut kinds = rows
            .iter()
            .map(|raw| {
                raw.parse::<VoteKind>()
                    .map_err(|_| LedgerError::InvalidVoteKind(raw.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        kinds.sort();

        Ok(kinds)
    }
}
