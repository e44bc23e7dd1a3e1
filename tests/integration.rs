/// End-to-end tests for the Engram application
///
/// These tests drive the JSON API and the server-rendered pages together,
/// verifying that state created through one surface shows up on the other.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::{create_card, create_deck, send_json};
use serde_json::json;
use tower::ServiceExt;

/// Fetches a page and returns its status, location header and HTML body
async fn get_page(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_deck_list_page_shows_created_decks() {
    let app = common::create_test_app();

    create_deck(&app, "Organic Chemistry").await;

    let (status, _, html) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Organic Chemistry"));
}

#[tokio::test]
async fn test_deck_page_renders_formulas() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Physics").await;
    let deck_id = deck["id"].as_str().unwrap();
    create_card(&app, deck_id, "The speed is $E=mc^2$ always", "relativity").await;

    let (status, _, html) = get_page(&app, &format!("/decks/{}", deck_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("formula-inline").count(), 1);
    assert!(html.contains("<sup>2</sup>"));
    assert!(html.contains("The speed is "));
}

#[tokio::test]
async fn test_deck_page_sanitizes_card_markup() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Sneaky").await;
    let deck_id = deck["id"].as_str().unwrap();
    create_card(&app, deck_id, "hi <script>alert(1)</script>", "bye").await;

    let (_, _, html) = get_page(&app, &format!("/decks/{}", deck_id)).await;
    assert!(!html.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn test_missing_deck_page_is_a_placeholder() {
    let app = common::create_test_app();

    let (status, _, html) = get_page(&app, "/decks/nonexistent").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Deck not found"));
}

#[tokio::test]
async fn test_study_page_flow() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();
    create_card(&app, deck_id, "the question", "the answer").await;

    // Starting redirects to a session-tagged URL
    let (status, location, _) = get_page(&app, &format!("/decks/{}/study", deck_id)).await;
    assert!(status.is_redirection());
    let study_url = location.unwrap();
    assert!(study_url.contains("session="));

    // The study page shows the front but not the back
    let (status, _, html) = get_page(&app, &study_url).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("the question"));
    assert!(!html.contains("the answer"));
    assert!(html.contains("Show answer"));
}

#[tokio::test]
async fn test_study_page_empty_deck_redirects_to_deck_page() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Empty").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, location, _) = get_page(&app, &format!("/decks/{}/study", deck_id)).await;
    assert!(status.is_redirection());
    assert_eq!(location.unwrap(), format!("/decks/{}", deck_id));
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = common::create_test_app();

    // Sign in
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "student@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Build a deck
    let deck = create_deck(&app, "Lifecycle").await;
    let deck_id = deck["id"].as_str().unwrap();
    create_card(&app, deck_id, "q1", "a1").await;
    create_card(&app, deck_id, "q2", "a2").await;

    // Study it to completion
    let (_, session) =
        send_json(&app, "POST", &format!("/api/decks/{}/study", deck_id), None).await;
    let session_id = session["id"].as_str().unwrap();
    for _ in 0..2 {
        send_json(&app, "POST", &format!("/api/study/{}/flip", session_id), None).await;
        send_json(
            &app,
            "POST",
            &format!("/api/study/{}/grade", session_id),
            Some(json!({ "remembered": true })),
        )
        .await;
    }
    let (_, state) = send_json(&app, "GET", &format!("/api/study/{}", session_id), None).await;
    assert_eq!(state["complete"], true);

    // Everything was remembered, so the whole deck is easy now
    let (_, cards) = send_json(&app, "GET", &format!("/api/decks/{}/cards", deck_id), None).await;
    for card in cards.as_array().unwrap() {
        assert_eq!(card["difficulty"], "easy");
    }

    // Tear the deck down
    let (status, _) = send_json(&app, "DELETE", &format!("/api/decks/{}", deck_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, decks) = send_json(&app, "GET", "/api/decks", None).await;
    assert!(decks.as_array().unwrap().is_empty());

    // Sign out
    let (status, _) = send_json(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
}
