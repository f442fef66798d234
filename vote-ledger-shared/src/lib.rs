//! # Vote Ledger Shared
//! This crate defines the data types shared between the vote ledger repository
//! and the HTTP service: identifiers, vote kinds, counters and apply receipts.
pub mod types;
