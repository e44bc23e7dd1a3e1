use axum::{extract::State, Json};
use tracing::{debug, info, instrument};

use crate::auth::AuthError;
use crate::dto::CredentialsDto;
use crate::errors::ApiError;
use crate::models::AuthRecord;
use crate::repo;
use crate::AppState;

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(msg) => ApiError::InvalidCredentials(msg),
        }
    }
}

/// Handler for reading the current sign-in state
///
/// This function handles GET requests to `/api/auth`.
///
/// ### Returns
///
/// The sign-in record as JSON, or null when signed out
#[instrument(skip(state))]
pub async fn get_auth_handler(
    State(state): State<AppState>,
) -> Result<Json<Option<AuthRecord>>, ApiError> {
    debug!("Reading sign-in state");

    let record = repo::get_auth(&state.pool).map_err(ApiError::Database)?;

    Ok(Json(record))
}

/// Handler for signing in
///
/// This function handles POST requests to `/api/auth/login`. The credential
/// check is delegated to the configured auth backend; on success the
/// resulting sign-in record replaces any existing one.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsDto>,
) -> Result<Json<AuthRecord>, ApiError> {
    info!("Signing in");

    let user = state
        .auth
        .authenticate(&payload.email, &payload.password)
        .await?;

    let record = repo::save_auth(&state.pool, user.email).map_err(ApiError::Database)?;

    Ok(Json(record))
}

/// Handler for creating an account
///
/// This function handles POST requests to `/api/auth/signup`. Signup shares
/// the login path; the stub backend does not distinguish them.
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsDto>,
) -> Result<Json<AuthRecord>, ApiError> {
    info!("Signing up");

    let user = state
        .auth
        .authenticate(&payload.email, &payload.password)
        .await?;

    let record = repo::save_auth(&state.pool, user.email).map_err(ApiError::Database)?;

    Ok(Json(record))
}

/// Handler for signing out
///
/// This function handles POST requests to `/api/auth/logout`. Signing out
/// while already signed out is not an error.
#[instrument(skip(state))]
pub async fn logout_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Signing out");

    repo::clear_auth(&state.pool).map_err(ApiError::Database)?;

    Ok(Json(serde_json::json!({ "signed_in": false })))
}
