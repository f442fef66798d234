//! This module defines and re-exports the interfaces for the vote ledger.
mod ledger;

pub use ledger::VoteLedger;
