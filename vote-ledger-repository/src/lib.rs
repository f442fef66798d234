//! # Vote Ledger Repository
//! This crate provides the `VoteLedger` trait and its SQLite implementation.
//! The ledger owns the `user_votes` membership rows and the three cached vote
//! counters on `questions`, and keeps them consistent inside one transaction
//! per batch.
pub mod errors;
pub mod interfaces;
pub mod sqlite;

pub use errors::LedgerError;
pub use interfaces::VoteLedger;
pub use sqlite::{LedgerConfig, SqliteVoteLedger};
