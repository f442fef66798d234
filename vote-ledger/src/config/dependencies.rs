use std::sync::Arc;

use tracing::info;
use vote_ledger_repository::{SqliteVoteLedger, VoteLedger};

use crate::config::Config;
use crate::errors::ServiceError;

/// `Dependencies` holds the components the HTTP server is built from.
pub struct Dependencies {
    pub ledger: Arc<dyn VoteLedger>,
    pub api_key: Option<String>,
}

impl Dependencies {
    /// Opens the ledger database, applies the bootstrap schema and wires the
    /// components described by `config`.
    ///
    /// # Returns
    ///
    /// `Ok(Self)` on success, or a `ServiceError` if the database cannot be
    /// opened or migrated.
    pub async fn new(config: &Config) -> Result<Self, ServiceError> {
        let ledger = SqliteVoteLedger::connect(&config.ledger).await?;
        ledger.migrate().await?;

        info!(
            busy_timeout_ms = config.ledger.busy_timeout.as_millis() as u64,
            max_connections = config.ledger.max_connections,
            "Vote ledger ready"
        );

        Ok(Self {
            ledger: Arc::new(ledger),
            api_key: config.api_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> Config {
        Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.to_string()),
            "API_KEY" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_dependencies_with_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("ledger.db").display());
        let deps = Dependencies::new(&config_for(&url)).await.unwrap();

        assert_eq!(deps.api_key.as_deref(), Some("secret"));
        assert_eq!(deps.ledger.get_counts(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dependencies_invalid_database_url() {
        let result = Dependencies::new(&config_for("sqlite:/nonexistent-dir/ledger.db")).await;

        assert!(matches!(result, Err(ServiceError::Ledger(_))));
    }
}
