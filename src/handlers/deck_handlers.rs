use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info, instrument};

use crate::dto::{CreateDeckDto, UpdateDeckDto};
use crate::errors::ApiError;
use crate::models::Deck;
use crate::repo;
use crate::AppState;

/// Handler for listing all decks
///
/// This function handles GET requests to `/api/decks`.
///
/// ### Returns
///
/// All decks as JSON, newest first
#[instrument(skip(state))]
pub async fn list_decks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deck>>, ApiError> {
    debug!("Listing decks");

    let decks = repo::list_decks(&state.pool).map_err(ApiError::Database)?;

    info!("Retrieved {} decks", decks.len());

    Ok(Json(decks))
}

/// Handler for creating a new deck
///
/// This function handles POST requests to `/api/decks`.
///
/// ### Arguments
///
/// * `payload` - The request payload containing the deck creation data
///
/// ### Returns
///
/// The newly created deck as JSON
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_deck_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckDto>,
) -> Result<Json<Deck>, ApiError> {
    info!("Creating new deck");

    if payload.name.trim().is_empty() {
        return Err(ApiError::EmptyContent(
            "Deck name must not be empty".to_string(),
        ));
    }

    let deck = repo::create_deck(&state.pool, payload.name, payload.description, payload.color)
        .map_err(ApiError::Database)?;

    info!("Successfully created deck with id: {}", deck.get_id());

    Ok(Json(deck))
}

/// Handler for retrieving a specific deck
///
/// This function handles GET requests to `/api/decks/{id}`.
#[instrument(skip(state), fields(deck_id = %id))]
pub async fn get_deck_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deck>, ApiError> {
    debug!("Getting deck");

    let deck = repo::get_deck(&state.pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(deck))
}

/// Handler for updating a deck's name, description and color
///
/// This function handles PUT requests to `/api/decks/{id}`.
#[instrument(skip(state, payload), fields(deck_id = %id, name = %payload.name))]
pub async fn update_deck_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDeckDto>,
) -> Result<Json<Deck>, ApiError> {
    info!("Updating deck");

    if payload.name.trim().is_empty() {
        return Err(ApiError::EmptyContent(
            "Deck name must not be empty".to_string(),
        ));
    }

    // Resolve missing decks to 404 before the update path reports them as 500
    repo::get_deck(&state.pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let deck = repo::update_deck(
        &state.pool,
        &id,
        payload.name,
        payload.description,
        payload.color,
    )
    .map_err(ApiError::Database)?;

    Ok(Json(deck))
}

/// Handler for deleting a deck and all its cards
///
/// This function handles DELETE requests to `/api/decks/{id}`.
#[instrument(skip(state), fields(deck_id = %id))]
pub async fn delete_deck_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Deleting deck");

    repo::get_deck(&state.pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    repo::delete_deck(&state.pool, &id).map_err(ApiError::Database)?;

    Ok(Json(serde_json::json!({ "deleted": id })))
}
