//! Route tests for the vote ledger HTTP server.
//!
//! Each test drives the axum `Router` directly against a fresh SQLite
//! database.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use vote_ledger::server::{AppState, create_app};
use vote_ledger_repository::SqliteVoteLedger;

struct Fixture {
    app: Router,
    question: i64,
    voter: i64,
}

async fn fixture(pool: SqlitePool, api_key: Option<&str>) -> Fixture {
    let ledger = SqliteVoteLedger::new(pool.clone()).await.unwrap();
    ledger.migrate().await.unwrap();

    let voter = sqlx::query("INSERT INTO users (email) VALUES ('voter@example.com')")
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();
    let question = sqlx::query(
        "INSERT INTO questions (user_id, question, category) VALUES (?, 'Is MFA enough?', 'Countermeasure')",
    )
    .bind(voter)
    .execute(&pool)
    .await
    .unwrap()
    .last_insert_rowid();

    let state = AppState::new(Arc::new(ledger), api_key.map(str::to_string));
    Fixture {
        app: create_app(state),
        question,
        voter,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[sqlx::test(migrations = false)]
async fn test_upvote_then_counts(pool: SqlitePool) {
    let f = fixture(pool, None).await;

    let (status, body) = send(
        &f.app,
        post_json(&format!("/questions/{}/upvote", f.question), json!({ "user_id": f.voter })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Upvote processed successfully!");
    assert_eq!(body["toggles"][0]["kind"], "upvote");
    assert_eq!(body["toggles"][0]["toggle"], "cast");

    let (status, body) = send(&f.app, get(&format!("/questions/{}/counts", f.question))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "upvotes": 1, "downvotes": 0, "reports": 0 }));
}

#[sqlx::test(migrations = false)]
async fn test_downvote_report_is_one_batch(pool: SqlitePool) {
    let f = fixture(pool, None).await;

    let (status, body) = send(
        &f.app,
        post_json(
            &format!("/questions/{}/downvote_report", f.question),
            json!({ "user_id": f.voter }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Downvote, Report processed successfully!");

    let (_, body) = send(&f.app, get(&format!("/questions/{}/counts", f.question))).await;
    assert_eq!(body, json!({ "upvotes": 0, "downvotes": 1, "reports": 1 }));

    let (status, body) = send(
        &f.app,
        get(&format!("/questions/{}/votes/{}", f.question, f.voter)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "kinds": ["downvote", "report"] }));
}

#[sqlx::test(migrations = false)]
async fn test_report_toggles_off(pool: SqlitePool) {
    let f = fixture(pool, None).await;
    let uri = format!("/questions/{}/report", f.question);

    send(&f.app, post_json(&uri, json!({ "user_id": f.voter }))).await;
    let (status, body) = send(&f.app, post_json(&uri, json!({ "user_id": f.voter }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["toggles"][0]["toggle"], "withdrawn");
    let (_, body) = send(&f.app, get(&format!("/questions/{}/counts", f.question))).await;
    assert_eq!(body["reports"], 0);
}

#[sqlx::test(migrations = false)]
async fn test_missing_user_id_is_rejected(pool: SqlitePool) {
    let f = fixture(pool, None).await;
    let uri = format!("/questions/{}/downvote", f.question);

    let (status, body) = send(&f.app, post_json(&uri, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User ID is required." }));

    let (status, _) = send(&f.app, post_json(&uri, json!({ "user_id": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&f.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&f.app, get(&format!("/questions/{}/counts", f.question))).await;
    assert_eq!(body["downvotes"], 0);
}

#[sqlx::test(migrations = false)]
async fn test_unknown_question_is_not_found(pool: SqlitePool) {
    let f = fixture(pool, None).await;

    let (status, body) = send(
        &f.app,
        post_json("/questions/9999/upvote", json!({ "user_id": f.voter })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Question 9999 not found");

    let (status, body) = send(&f.app, get("/questions/9999/counts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Question not found." }));
}

#[sqlx::test(migrations = false)]
async fn test_unknown_user_is_not_found(pool: SqlitePool) {
    let f = fixture(pool, None).await;

    let (status, _) = send(
        &f.app,
        post_json(
            &format!("/questions/{}/upvote", f.question),
            json!({ "user_id": 4242 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&f.app, get(&format!("/questions/{}/counts", f.question))).await;
    assert_eq!(body["upvotes"], 0);
}

#[sqlx::test(migrations = false)]
async fn test_api_key_guard(pool: SqlitePool) {
    let f = fixture(pool, Some("secret")).await;
    let uri = format!("/questions/{}/upvote", f.question);

    let (status, body) = send(&f.app, post_json(&uri, json!({ "user_id": f.voter }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "Unauthorized access. API key missing or invalid" })
    );

    let mut wrong_key = post_json(&uri, json!({ "user_id": f.voter }));
    wrong_key
        .headers_mut()
        .insert("x-api-key", "nope".parse().unwrap());
    let (status, _) = send(&f.app, wrong_key).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut authorized = post_json(&uri, json!({ "user_id": f.voter }));
    authorized
        .headers_mut()
        .insert("x-api-key", "secret".parse().unwrap());
    let (status, _) = send(&f.app, authorized).await;
    assert_eq!(status, StatusCode::CREATED);

    let response = f.app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
