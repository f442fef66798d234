//! Vote Ledger Service Library
//!
//! Configuration loading, dependency wiring, error types and the HTTP routes
//! exposing the vote ledger.

pub mod config;
pub mod errors;
pub mod server;

pub use config::{Config, Dependencies};
pub use errors::ServiceError;
