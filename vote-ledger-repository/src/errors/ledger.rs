//! Error types for the vote ledger.
//! Separates referential failures from lock contention so callers can decide
//! whether a retry makes sense.
use thiserror::Error;
use vote_ledger_shared::types::QuestionId;

/// SQLite primary result codes meaning the database was busy or locked.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Represents errors that can occur within the vote ledger.
///
/// Every variant is returned after the surrounding transaction has been
/// rolled back, so a failed call never leaves partial state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("At least one vote kind is required")]
    EmptyBatch,

    #[error("Question {0} not found")]
    QuestionNotFound(QuestionId),

    #[error("Referential integrity violation: {0}")]
    Referential(String),

    #[error("Database is busy, retry later: {0}")]
    Contention(String),

    #[error("Invalid vote kind: {0}")]
    InvalidVoteKind(String),

    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl LedgerError {
    /// Whether retrying the same call may succeed.
    ///
    /// Only contention qualifies: the failed call changed nothing, so a retry
    /// applies the batch exactly once.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Contention(_))
    }
}

fn is_contention(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)),
        _ => false,
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        if is_contention(&err) {
            return LedgerError::Contention(err.to_string());
        }

        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return LedgerError::Referential(db_err.message().to_string());
            }
        }

        LedgerError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_contention() {
        let err = LedgerError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, LedgerError::Contention(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        let err = LedgerError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, LedgerError::DatabaseError(sqlx::Error::RowNotFound)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_only_contention_is_retryable() {
        assert!(!LedgerError::EmptyBatch.is_retryable());
        assert!(!LedgerError::QuestionNotFound(1).is_retryable());
        assert!(!LedgerError::Referential("FOREIGN KEY constraint failed".into()).is_retryable());
        assert!(LedgerError::Contention("database is locked".into()).is_retryable());
    }
}
