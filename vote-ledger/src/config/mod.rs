//! Configuration module for the vote ledger service.
//! Defines the environment-driven settings and the dependency wiring.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{Config, ConfigError, LogFormat};
