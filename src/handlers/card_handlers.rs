use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info, instrument};

use crate::dto::{CreateCardDto, UpdateCardDto};
use crate::errors::ApiError;
use crate::models::{Card, CardContent};
use crate::repo;
use crate::AppState;

/// Checks one card side before it reaches the repository
///
/// Empty content and ragged tables are both client errors, reported with the
/// side they were found on.
fn validate_content(content: &CardContent, side: &str) -> Result<(), ApiError> {
    if !content.is_non_empty() {
        return Err(ApiError::EmptyContent(format!(
            "Card {} must not be empty",
            side
        )));
    }
    if let CardContent::Rich(rich) = content {
        if !rich.tables_are_rectangular() {
            return Err(ApiError::InvalidContent(format!(
                "Card {} contains a non-rectangular table",
                side
            )));
        }
    }
    Ok(())
}

/// Handler for listing the cards of a deck
///
/// This function handles GET requests to `/api/decks/{deck_id}/cards`.
///
/// ### Returns
///
/// The deck's cards as JSON, most recently added first
#[instrument(skip(state), fields(deck_id = %deck_id))]
pub async fn list_cards_handler(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<Vec<Card>>, ApiError> {
    debug!("Listing cards");

    repo::get_deck(&state.pool, &deck_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;

    info!("Retrieved {} cards", cards.len());

    Ok(Json(cards))
}

/// Handler for creating a new card in a deck
///
/// This function handles POST requests to `/api/decks/{deck_id}/cards`.
///
/// ### Arguments
///
/// * `deck_id` - The ID of the deck to create a card in
/// * `payload` - The request payload containing the card creation data
///
/// ### Returns
///
/// The newly created card as JSON
#[instrument(skip(state, payload), fields(deck_id = %deck_id))]
pub async fn create_card_handler(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(payload): Json<CreateCardDto>,
) -> Result<Json<Card>, ApiError> {
    info!("Creating new card");

    validate_content(&payload.front, "front")?;
    validate_content(&payload.back, "back")?;

    repo::get_deck(&state.pool, &deck_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let card = repo::create_card(
        &state.pool,
        &deck_id,
        payload.front,
        payload.back,
        payload.difficulty,
    )
    .map_err(ApiError::Database)?;

    info!("Successfully created card with id: {}", card.get_id());

    Ok(Json(card))
}

/// Handler for updating a card's content and difficulty
///
/// This function handles PUT requests to
/// `/api/decks/{deck_id}/cards/{card_id}`.
#[instrument(skip(state, payload), fields(deck_id = %deck_id, card_id = %card_id))]
pub async fn update_card_handler(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
    Json(payload): Json<UpdateCardDto>,
) -> Result<Json<Card>, ApiError> {
    info!("Updating card");

    validate_content(&payload.front, "front")?;
    validate_content(&payload.back, "back")?;

    repo::get_card(&state.pool, &deck_id, &card_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let card = repo::update_card(
        &state.pool,
        &deck_id,
        &card_id,
        payload.front,
        payload.back,
        payload.difficulty,
    )
    .map_err(ApiError::Database)?;

    Ok(Json(card))
}

/// Handler for deleting a card from a deck
///
/// This function handles DELETE requests to
/// `/api/decks/{deck_id}/cards/{card_id}`.
#[instrument(skip(state), fields(deck_id = %deck_id, card_id = %card_id))]
pub async fn delete_card_handler(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Deleting card");

    repo::get_card(&state.pool, &deck_id, &card_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    repo::delete_card(&state.pool, &deck_id, &card_id).map_err(ApiError::Database)?;

    Ok(Json(serde_json::json!({ "deleted": card_id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use crate::models::{Difficulty, RichContent};

    fn plain(text: &str) -> CardContent {
        CardContent::Plain(text.to_string())
    }

    #[tokio::test]
    async fn test_create_card_handler() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();

        let payload = CreateCardDto {
            front: plain("What is 2 + 2?"),
            back: plain("4"),
            difficulty: Difficulty::Medium,
        };
        let card = create_card_handler(State(state.clone()), Path(deck.get_id()), Json(payload))
            .await
            .unwrap()
            .0;

        assert_eq!(card.get_deck_id(), deck.get_id());

        let cards = list_cards_handler(State(state), Path(deck.get_id()))
            .await
            .unwrap()
            .0;
        assert_eq!(cards.len(), 1);
    }

    #[tokio::test]
    async fn test_create_card_handler_deck_not_found() {
        let state = test_state();

        let payload = CreateCardDto {
            front: plain("q"),
            back: plain("a"),
            difficulty: Difficulty::Medium,
        };
        let result =
            create_card_handler(State(state), Path("nonexistent".to_string()), Json(payload)).await;
        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_card_handler_empty_side() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();

        let payload = CreateCardDto {
            front: plain("   "),
            back: plain("a"),
            difficulty: Difficulty::Medium,
        };
        let result = create_card_handler(State(state), Path(deck.get_id()), Json(payload)).await;
        assert!(matches!(result, Err(ApiError::EmptyContent(_))));
    }

    #[tokio::test]
    async fn test_create_card_handler_ragged_table() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();

        let payload = CreateCardDto {
            front: CardContent::Rich(RichContent {
                tables: vec![vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["c".to_string()],
                ]],
                ..Default::default()
            }),
            back: plain("a"),
            difficulty: Difficulty::Medium,
        };
        let result = create_card_handler(State(state), Path(deck.get_id()), Json(payload)).await;
        assert!(matches!(result, Err(ApiError::InvalidContent(_))));
    }

    #[tokio::test]
    async fn test_update_card_handler() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();
        let card = repo::create_card(
            &state.pool,
            &deck.get_id(),
            plain("q"),
            plain("a"),
            Difficulty::Medium,
        )
        .unwrap();

        let payload = UpdateCardDto {
            front: plain("new q"),
            back: plain("new a"),
            difficulty: Difficulty::Hard,
        };
        let updated = update_card_handler(
            State(state),
            Path((deck.get_id(), card.get_id())),
            Json(payload),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(updated.get_id(), card.get_id());
        assert_eq!(updated.get_difficulty(), Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_update_card_handler_not_found() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();

        let payload = UpdateCardDto {
            front: plain("q"),
            back: plain("a"),
            difficulty: Difficulty::Medium,
        };
        let result = update_card_handler(
            State(state),
            Path((deck.get_id(), "nonexistent".to_string())),
            Json(payload),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_card_handler() {
        let state = test_state();
        let deck = repo::create_deck(&state.pool, "Deck".to_string(), None, None).unwrap();
        let card = repo::create_card(
            &state.pool,
            &deck.get_id(),
            plain("q"),
            plain("a"),
            Difficulty::Medium,
        )
        .unwrap();

        delete_card_handler(State(state.clone()), Path((deck.get_id(), card.get_id())))
            .await
            .unwrap();

        let cards = list_cards_handler(State(state), Path(deck.get_id()))
            .await
            .unwrap()
            .0;
        assert!(cards.is_empty());
    }
}
