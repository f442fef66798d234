//! Vote Ledger Main Entry Point
//!
//! Serves the vote, report and counts endpoints backed by the SQLite ledger.

use std::net::SocketAddr;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vote_ledger::config::LogFormat;
use vote_ledger::server::{AppState, create_app, run_server};
use vote_ledger::{Config, Dependencies, ServiceError};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) -> Result<(), ServiceError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vote_ledger=info,vote_ledger_repository=info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init(),
    };
    result.map_err(|e| ServiceError::Tracing(e.to_string()))?;

    info!(
        service_name = "vote-ledger",
        service_version = env!("CARGO_PKG_VERSION"),
        ?format,
        "Tracing initialized"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    info!("Starting vote ledger");

    let dependencies = match Dependencies::new(&config).await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    if dependencies.api_key.is_none() {
        info!("API_KEY not set, question routes are unauthenticated");
    }

    let app = create_app(AppState::new(dependencies.ledger, dependencies.api_key));
    let addr = SocketAddr::new(config.host, config.port);

    run_server(app, addr).await?;
    Ok(())
}
