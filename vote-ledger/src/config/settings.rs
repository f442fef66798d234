use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use vote_ledger_repository::LedgerConfig;

/// Default bind host.
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Default bind port.
const DEFAULT_PORT: u16 = 5000;

/// Default lock wait in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Default pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"pretty\" or \"json\", got {other:?}")),
        }
    }
}

/// Service settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub host: IpAddr,
    pub port: u16,
    /// When set, `/questions` routes require a matching `X-API-Key` header.
    pub api_key: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: SQLite URL (required)
    /// - `LEDGER_BUSY_TIMEOUT_MS`: lock wait in milliseconds (default: 5000)
    /// - `LEDGER_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `SERVER_HOST`: bind host (default: 127.0.0.1)
    /// - `SERVER_PORT`: bind port (default: 5000)
    /// - `API_KEY`: enables the API-key guard (default: unset)
    /// - `LOG_FORMAT`: "pretty" or "json" (default: pretty)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let busy_timeout_ms = parse_or(&lookup, "LEDGER_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;
        let max_connections = parse_or(&lookup, "LEDGER_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "LEDGER_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "pool needs at least one connection".to_string(),
            });
        }

        let ledger = LedgerConfig::new(database_url)
            .with_busy_timeout(Duration::from_millis(busy_timeout_ms))
            .with_max_connections(max_connections);

        Ok(Self {
            ledger,
            host: parse_or(&lookup, "SERVER_HOST", DEFAULT_HOST)?,
            port: parse_or(&lookup, "SERVER_PORT", DEFAULT_PORT)?,
            api_key: lookup("API_KEY").filter(|key| !key.is_empty()),
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
