//! Error types for the vote ledger repository.
//! Consolidates and re-exports error types related to ledger operations.
mod ledger;

pub use ledger::LedgerError;
