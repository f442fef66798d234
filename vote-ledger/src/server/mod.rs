// Server module - HTTP server setup and routing
pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderName, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use self::error::ApiError;
pub use self::state::AppState;

/// Create CORS layer for browser frontends
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(auth::API_KEY_HEADER)])
}

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let questions = Router::new()
        .route("/questions/:id/upvote", post(handlers::upvote))
        .route("/questions/:id/downvote", post(handlers::downvote))
        .route("/questions/:id/report", post(handlers::report))
        .route("/questions/:id/downvote_report", post(handlers::downvote_report))
        .route("/questions/:id/counts", get(handlers::get_counts))
        .route("/questions/:id/votes/:user_id", get(handlers::get_user_votes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(questions)
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
