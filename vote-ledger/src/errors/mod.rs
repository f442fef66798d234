//! Error types for the vote ledger service.
//! Consolidates startup failures from configuration, storage and the server.
use vote_ledger_repository::LedgerError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
    #[error("Tracing error: {0}")]
    Tracing(String),
}
