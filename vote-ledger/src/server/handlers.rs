// HTTP request handlers
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use vote_ledger_shared::types::{KindToggle, QuestionId, UserId, VoteCounts, VoteKind};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Body of every vote route.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub message: String,
    pub toggles: Vec<KindToggle>,
}

#[derive(Debug, Serialize)]
pub struct UserVotesResponse {
    pub kinds: Vec<VoteKind>,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Vote ledger is running")
}

pub async fn upvote(
    state: State<AppState>,
    path: Path<QuestionId>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    apply(state, path, payload, &[VoteKind::Upvote]).await
}

pub async fn downvote(
    state: State<AppState>,
    path: Path<QuestionId>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    apply(state, path, payload, &[VoteKind::Downvote]).await
}

pub async fn report(
    state: State<AppState>,
    path: Path<QuestionId>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    apply(state, path, payload, &[VoteKind::Report]).await
}

/// Downvote and report as one atomic batch: both toggle or neither does.
pub async fn downvote_report(
    state: State<AppState>,
    path: Path<QuestionId>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    apply(state, path, payload, &[VoteKind::Downvote, VoteKind::Report]).await
}

async fn apply(
    State(state): State<AppState>,
    Path(question_id): Path<QuestionId>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
    kinds: &[VoteKind],
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    // A missing or unparsable body is reported the same way as a missing id.
    let user_id = payload
        .ok()
        .and_then(|Json(request)| request.user_id)
        .ok_or(ApiError::MissingUserId)?;

    let receipt = state.ledger.apply_votes(user_id, question_id, kinds).await?;
    info!(user_id, question_id, kinds = ?kinds, "Votes applied");

    Ok((
        StatusCode::CREATED,
        Json(VoteResponse {
            message: receipt.message(),
            toggles: receipt.toggles,
        }),
    ))
}

pub async fn get_counts(
    State(state): State<AppState>,
    Path(question_id): Path<QuestionId>,
) -> Result<Json<VoteCounts>, ApiError> {
    state
        .ledger
        .get_counts(question_id)
        .await?
        .map(Json)
        .ok_or(ApiError::QuestionNotFound)
}

pub async fn get_user_votes(
    State(state): State<AppState>,
    Path((question_id, user_id)): Path<(QuestionId, UserId)>,
) -> Result<Json<UserVotesResponse>, ApiError> {
    let kinds = state.ledger.get_user_votes(user_id, question_id).await?;
    Ok(Json(UserVotesResponse { kinds }))
}
