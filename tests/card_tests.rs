/// Integration tests for the card endpoints

mod common;

use axum::http::StatusCode;
use common::{create_card, create_deck, send_json};
use serde_json::json;

#[tokio::test]
async fn test_create_card_with_plain_content() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let card = create_card(&app, deck_id, "What is 2 + 2?", "4").await;

    assert_eq!(card["deck_id"].as_str().unwrap(), deck_id);
    assert_eq!(card["front"], "What is 2 + 2?");
    assert_eq!(card["difficulty"], "medium");
    assert!(card["last_reviewed"].is_null());
}

#[tokio::test]
async fn test_create_card_with_rich_content() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, card) = send_json(
        &app,
        "POST",
        &format!("/api/decks/{}/cards", deck_id),
        Some(json!({
            "front": {
                "text": "Identify the diagram",
                "images": ["https://example.com/a.png"],
                "tables": [[["x", "y"], ["1", "2"]]]
            },
            "back": "An axis plot",
            "difficulty": "hard"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["front"]["text"], "Identify the diagram");
    assert_eq!(card["front"]["images"][0], "https://example.com/a.png");
    assert_eq!(card["difficulty"], "hard");
}

#[tokio::test]
async fn test_create_card_with_empty_side_is_unprocessable() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/decks/{}/cards", deck_id),
        Some(json!({ "front": "  ", "back": "a" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("front"));
}

#[tokio::test]
async fn test_create_card_with_ragged_table_is_unprocessable() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/decks/{}/cards", deck_id),
        Some(json!({
            "front": { "tables": [[["a", "b"], ["c"]]] },
            "back": "a"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_cards_most_recent_first() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let first = create_card(&app, deck_id, "q1", "a1").await;
    let second = create_card(&app, deck_id, "q2", "a2").await;

    let (status, cards) =
        send_json(&app, "GET", &format!("/api/decks/{}/cards", deck_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["id"], second["id"]);
    assert_eq!(cards[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_update_card_preserves_identity() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();
    let card = create_card(&app, deck_id, "q", "a").await;
    let card_id = card["id"].as_str().unwrap();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/decks/{}/cards/{}", deck_id, card_id),
        Some(json!({ "front": "new q", "back": "new a", "difficulty": "easy" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], card["id"]);
    assert_eq!(updated["created_at"], card["created_at"]);
    assert_eq!(updated["front"], "new q");
    assert_eq!(updated["difficulty"], "easy");
}

#[tokio::test]
async fn test_table_shape_survives_cell_edit() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, card) = send_json(
        &app,
        "POST",
        &format!("/api/decks/{}/cards", deck_id),
        Some(json!({
            "front": {
                "tables": [[["a", "b"], ["c", "d"], ["e", "f"]]]
            },
            "back": "legend"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let card_id = card["id"].as_str().unwrap();

    // Change one cell; the grid stays 3 rows of 2 columns
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/decks/{}/cards/{}", deck_id, card_id),
        Some(json!({
            "front": {
                "tables": [[["a", "b"], ["c", "edited"], ["e", "f"]]]
            },
            "back": "legend"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let table = updated["front"]["tables"][0].as_array().unwrap();
    assert_eq!(table.len(), 3);
    for row in table {
        assert_eq!(row.as_array().unwrap().len(), 2);
    }
    assert_eq!(updated["front"]["tables"][0][1][1], "edited");
}

#[tokio::test]
async fn test_update_card_in_wrong_deck_is_not_found() {
    let app = common::create_test_app();

    let deck_a = create_deck(&app, "A").await;
    let deck_b = create_deck(&app, "B").await;
    let card = create_card(&app, deck_a["id"].as_str().unwrap(), "q", "a").await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!(
            "/api/decks/{}/cards/{}",
            deck_b["id"].as_str().unwrap(),
            card["id"].as_str().unwrap()
        ),
        Some(json!({ "front": "q", "back": "a" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_card_is_not_found() {
    let app = common::create_test_app();

    let deck = create_deck(&app, "Deck").await;
    let deck_id = deck["id"].as_str().unwrap();

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/decks/{}/cards/nonexistent", deck_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
