/// Common test utilities for Engram integration tests
///
/// This file contains shared functions and utilities for all integration
/// tests, including test application setup and helper functions for creating
/// common test objects through the API.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use engram::{
    auth::StubAuthProvider,
    create_app,
    db::init_pool,
    render::BasicTypesetter,
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Creates a test application with an in-memory SQLite database
///
/// This helper function:
/// 1. Creates an in-memory SQLite database shared across the pool
/// 2. Runs migrations to set up the schema
/// 3. Creates an Axum application with a zero-delay stub auth backend
///
/// Using an in-memory database ensures that:
/// - Tests run quickly
/// - Tests are isolated from each other
/// - No cleanup is needed after tests
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an in-memory
/// database
pub fn create_test_app() -> Router {
    // A unique shared-cache URI so every pooled connection sees the same
    // in-memory database
    let database_url = format!("file:test_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    engram::run_migrations(conn);

    let state = AppState::new(
        pool,
        Arc::new(StubAuthProvider::with_delay(Duration::ZERO)),
        Arc::new(BasicTypesetter::new()),
    );

    create_app(state)
}

/// Sends a JSON request and returns the status and parsed JSON body
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json");

    let request = match body {
        Some(value) => builder
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Creates a deck via the API and returns its JSON representation
pub async fn create_deck(app: &Router, name: &str) -> Value {
    let (status, deck) = send_json(
        app,
        "POST",
        "/api/decks",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    deck
}

/// Creates a plain-text card via the API and returns its JSON representation
pub async fn create_card(app: &Router, deck_id: &str, front: &str, back: &str) -> Value {
    let (status, card) = send_json(
        app,
        "POST",
        &format!("/api/decks/{}/cards", deck_id),
        Some(json!({ "front": front, "back": back })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    card
}
