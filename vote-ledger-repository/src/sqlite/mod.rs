//! SQLite implementation of the vote ledger.
//!
//! ## Database Tables
//!
//! - `questions`: owns the `upvotes`, `downvotes` and `reports` counters
//! - `user_votes`: one row per (user, question, kind) membership
//! - `users`: referenced by both, managed elsewhere
mod config;
mod vote_ledger;

pub use config::LedgerConfig;
pub use vote_ledger::SqliteVoteLedger;
