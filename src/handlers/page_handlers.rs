use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::dto::CredentialsDto;
use crate::errors::ApiError;
use crate::repo;
use crate::session::{SessionError, StudySession};
use crate::views;
use crate::AppState;

/// Query parameters for the study page
#[derive(Debug, Deserialize)]
pub struct StudyPageQuery {
    #[serde(default)]
    pub session: Option<String>,
}

/// Form payload for grading from the study page
#[derive(Debug, Deserialize)]
pub struct GradeForm {
    pub remembered: bool,
}

fn signed_in(state: &AppState) -> Result<bool, ApiError> {
    Ok(repo::get_auth(&state.pool)
        .map_err(ApiError::Database)?
        .is_some())
}

/// Handler for the deck list page
///
/// This function handles GET requests to `/`.
#[instrument(skip(state))]
pub async fn index_page_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    debug!("Rendering deck list page");

    let decks = repo::list_decks(&state.pool).map_err(ApiError::Database)?;
    let signed_in = signed_in(&state)?;

    Ok(views::decks::decks_page(&decks, signed_in).into_response())
}

/// Handler for the deck detail page
///
/// This function handles GET requests to `/decks/{deck_id}`. A missing deck
/// renders a placeholder page rather than an error.
#[instrument(skip(state), fields(deck_id = %deck_id))]
pub async fn deck_page_handler(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Response, ApiError> {
    debug!("Rendering deck detail page");

    let signed_in = signed_in(&state)?;

    let Some(deck) = repo::get_deck(&state.pool, &deck_id).map_err(ApiError::Database)? else {
        return Ok(views::deck_detail::deck_missing_page(signed_in).into_response());
    };

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;

    Ok(
        views::deck_detail::deck_page(&deck, &cards, state.typesetter.as_ref(), signed_in)
            .into_response(),
    )
}

/// Handler for the study page
///
/// This function handles GET requests to `/decks/{deck_id}/study`. Without a
/// known `session` query parameter a new session is started and the browser
/// is redirected back here carrying its id; an empty deck redirects to the
/// deck view instead.
#[instrument(skip(state, query), fields(deck_id = %deck_id))]
pub async fn study_page_handler(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Query(query): Query<StudyPageQuery>,
) -> Result<Response, ApiError> {
    debug!("Rendering study page");

    let signed_in = signed_in(&state)?;

    let Some(deck) = repo::get_deck(&state.pool, &deck_id).map_err(ApiError::Database)? else {
        return Ok(views::deck_detail::deck_missing_page(signed_in).into_response());
    };

    if let Some(session_id) = &query.session {
        let sessions = state.sessions.lock().unwrap();
        if let Some(session) = sessions.get(session_id) {
            if session.get_deck_id() == deck_id {
                return Ok(views::study::study_page(
                    &deck,
                    session,
                    state.typesetter.as_ref(),
                    signed_in,
                )
                .into_response());
            }
        }
    }

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;

    let session = match StudySession::start(deck_id.clone(), cards) {
        Ok(session) => session,
        Err(SessionError::EmptyDeck) => {
            return Ok(Redirect::to(&format!("/decks/{}", deck_id)).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    info!("Started page session {}", session.get_id());

    let target = format!("/decks/{}/study?session={}", deck_id, session.get_id());
    let mut sessions = state.sessions.lock().unwrap();
    sessions.insert(session.get_id(), session);

    Ok(Redirect::to(&target).into_response())
}

fn study_redirect(deck_id: &str, session_id: &str) -> Response {
    Redirect::to(&format!("/decks/{}/study?session={}", deck_id, session_id)).into_response()
}

/// Handler for the study page's flip action
///
/// This function handles POST requests to `/study/{session_id}/flip` and
/// redirects back to the study page.
#[instrument(skip(state), fields(session_id = %session_id))]
pub async fn flip_page_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    let mut sessions = state.sessions.lock().unwrap();
    let Some(session) = sessions.get_mut(&session_id) else {
        return Ok(Redirect::to("/").into_response());
    };

    // An out-of-order flip just falls through to a re-render
    let _ = session.flip();

    Ok(study_redirect(&session.get_deck_id(), &session_id))
}

/// Handler for the study page's grade action
///
/// This function handles POST requests to `/study/{session_id}/grade` and
/// redirects back to the study page after persisting the grade.
#[instrument(skip(state, form), fields(session_id = %session_id))]
pub async fn grade_page_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Form(form): Form<GradeForm>,
) -> Result<Response, ApiError> {
    let (graded_card, deck_id) = {
        let mut sessions = state.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(&session_id) else {
            return Ok(Redirect::to("/").into_response());
        };
        let deck_id = session.get_deck_id();
        match session.grade(form.remembered, Utc::now()) {
            Ok(card) => (Some(card), deck_id),
            // Grading an unflipped or finished card re-renders the page
            Err(_) => (None, deck_id),
        }
    };

    if let Some(card) = graded_card {
        repo::save_reviewed_card(&state.pool, &card).map_err(ApiError::Database)?;
    }

    Ok(study_redirect(&deck_id, &session_id))
}

/// Handler for the study page's restart action
///
/// This function handles POST requests to `/study/{session_id}/restart` and
/// redirects back to the study page, or to the deck view when the deck has
/// been emptied since the session began.
#[instrument(skip(state), fields(session_id = %session_id))]
pub async fn restart_page_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    let deck_id = {
        let sessions = state.sessions.lock().unwrap();
        let Some(session) = sessions.get(&session_id) else {
            return Ok(Redirect::to("/").into_response());
        };
        session.get_deck_id()
    };

    // A deck deleted mid-session leaves nothing to restart into
    if repo::get_deck(&state.pool, &deck_id)
        .map_err(ApiError::Database)?
        .is_none()
    {
        return Ok(Redirect::to("/").into_response());
    }

    let cards = repo::list_cards(&state.pool, &deck_id).map_err(ApiError::Database)?;

    let mut sessions = state.sessions.lock().unwrap();
    let Some(session) = sessions.get_mut(&session_id) else {
        return Ok(Redirect::to("/").into_response());
    };

    match session.restart(cards) {
        Ok(()) => Ok(study_redirect(&deck_id, &session_id)),
        Err(SessionError::EmptyDeck) => {
            Ok(Redirect::to(&format!("/decks/{}", deck_id)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Handler for the sign-in page
///
/// This function handles GET requests to `/login`. An already signed-in
/// visitor is sent back to the deck list.
#[instrument(skip(state))]
pub async fn login_page_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    if signed_in(&state)? {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(views::auth::login_page(None).into_response())
}

/// Handler for the sign-in form
///
/// This function handles POST requests to `/login`. Bad credentials
/// re-render the form with the backend's message.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<CredentialsDto>,
) -> Result<Response, ApiError> {
    info!("Processing sign-in form");

    match state.auth.authenticate(&form.email, &form.password).await {
        Ok(user) => {
            repo::save_auth(&state.pool, user.email).map_err(ApiError::Database)?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Ok(views::auth::login_page(Some(&err.to_string())).into_response()),
    }
}

/// Handler for the sign-up page
///
/// This function handles GET requests to `/signup`.
#[instrument(skip(state))]
pub async fn signup_page_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    if signed_in(&state)? {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(views::auth::signup_page(None).into_response())
}

/// Handler for the sign-up form
///
/// This function handles POST requests to `/signup`; it shares the sign-in
/// path.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn signup_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<CredentialsDto>,
) -> Result<Response, ApiError> {
    info!("Processing sign-up form");

    match state.auth.authenticate(&form.email, &form.password).await {
        Ok(user) => {
            repo::save_auth(&state.pool, user.email).map_err(ApiError::Database)?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Ok(views::auth::signup_page(Some(&err.to_string())).into_response()),
    }
}

/// Handler for the sign-out form
///
/// This function handles POST requests to `/logout`.
#[instrument(skip(state))]
pub async fn logout_submit_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    repo::clear_auth(&state.pool).map_err(ApiError::Database)?;
    Ok(Redirect::to("/login").into_response())
}
