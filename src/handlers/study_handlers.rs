use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::dto::{GradeDto, SessionStateDto};
use crate::errors::ApiError;
use crate::repo;
use crate::session::StudySession;
use crate::AppState;

/// Handler for starting a study session over a deck
///
/// This function handles POST requests to `/api/decks/{deck_id}/study`.
/// The session snapshots a shuffled copy of the deck's current cards; later
/// deck edits do not alter the in-progress ordering.
///
/// ### Returns
///
/// The initial session state as JSON
#[instrument(skip(state), fields(deck_id = %deck_id))]
pub async fn start_study_handler(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<SessionStateDto>, ApiError> {
    info!("Starting study session");

    repo::get_deck(&state.pool, &deck_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;
    let session = StudySession::start(deck_id, cards)?;
    let dto = SessionStateDto::from(&session);

    info!("Started session {} with {} cards", dto.id, dto.total);

    let mut sessions = state.sessions.lock().unwrap();
    sessions.insert(session.get_id(), session);

    Ok(Json(dto))
}

/// Handler for reading a study session's current state
///
/// This function handles GET requests to `/api/study/{session_id}`.
#[instrument(skip(state), fields(session_id = %session_id))]
pub async fn get_study_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStateDto>, ApiError> {
    debug!("Reading study session");

    let sessions = state.sessions.lock().unwrap();
    let session = sessions.get(&session_id).ok_or(ApiError::NotFound)?;

    Ok(Json(SessionStateDto::from(session)))
}

/// Handler for flipping the current card of a session
///
/// This function handles POST requests to `/api/study/{session_id}/flip`.
#[instrument(skip(state), fields(session_id = %session_id))]
pub async fn flip_study_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStateDto>, ApiError> {
    debug!("Flipping current card");

    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&session_id).ok_or(ApiError::NotFound)?;

    session.flip()?;

    Ok(Json(SessionStateDto::from(&*session)))
}

/// Handler for grading the current card of a session
///
/// This function handles POST requests to `/api/study/{session_id}/grade`.
/// The grade lands on the session snapshot first and is then persisted to
/// the source deck, so future sessions see the updated difficulty.
#[instrument(skip(state, payload), fields(session_id = %session_id, remembered = %payload.remembered))]
pub async fn grade_study_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<GradeDto>,
) -> Result<Json<SessionStateDto>, ApiError> {
    info!("Grading current card");

    // Grade under the lock, persist after releasing it
    let (graded_card, dto) = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = sessions.get_mut(&session_id).ok_or(ApiError::NotFound)?;
        let card = session.grade(payload.remembered, Utc::now())?;
        (card, SessionStateDto::from(&*session))
    };

    repo::save_reviewed_card(&state.pool, &graded_card).map_err(ApiError::Database)?;

    Ok(Json(dto))
}

/// Handler for restarting a study session
///
/// This function handles POST requests to `/api/study/{session_id}/restart`.
/// The deck's card list is re-fetched and reshuffled, so cards added or
/// removed since the session began are picked up.
#[instrument(skip(state), fields(session_id = %session_id))]
pub async fn restart_study_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStateDto>, ApiError> {
    info!("Restarting study session");

    let deck_id = {
        let sessions = state.sessions.lock().unwrap();
        let session = sessions.get(&session_id).ok_or(ApiError::NotFound)?;
        session.get_deck_id()
    };

    // The deck may have been deleted since the session began
    repo::get_deck(&state.pool, &deck_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;

    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&session_id).ok_or(ApiError::NotFound)?;
    session.restart(cards)?;

    Ok(Json(SessionStateDto::from(&*session)))
}
