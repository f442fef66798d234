use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use vote_ledger_repository::LedgerError;

/// Seconds a client should wait before retrying after contention.
const RETRY_AFTER_SECS: &str = "1";

/// Errors returned by the HTTP handlers.
///
/// Each failure class gets its own status: validation 400, missing key 401,
/// referential 404, contention 503, everything else 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User ID is required.")]
    MissingUserId,

    #[error("Unauthorized access. API key missing or invalid")]
    Unauthorized,

    #[error("Question not found.")]
    QuestionNotFound,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUserId => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::QuestionNotFound => StatusCode::NOT_FOUND,
            ApiError::Ledger(e) => match e {
                LedgerError::EmptyBatch => StatusCode::BAD_REQUEST,
                LedgerError::QuestionNotFound(_) | LedgerError::Referential(_) => StatusCode::NOT_FOUND,
                LedgerError::Contention(_) => StatusCode::SERVICE_UNAVAILABLE,
                LedgerError::InvalidVoteKind(_)
                | LedgerError::DatabaseError(_)
                | LedgerError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));

        match status {
            StatusCode::SERVICE_UNAVAILABLE => {
                warn!(error = %self, "Request failed on lock contention");
                (status, [(header::RETRY_AFTER, RETRY_AFTER_SECS)], body).into_response()
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(error = %self, "Request failed");
                (status, body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
