use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Deck/Card/Session not found")]
    NotFound,
    #[error("Empty content: {0}")]
    EmptyContent(String),
    #[error("Deck has no cards to study")]
    EmptyDeck,
    #[error("Card must be flipped before grading")]
    NotFlipped,
    #[error("Study session is already complete")]
    SessionComplete,
    #[error("Invalid content: {0}")]
    InvalidContent(String),
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl From<crate::session::SessionError> for ApiError {
    fn from(err: crate::session::SessionError) -> Self {
        use crate::session::SessionError;
        match err {
            SessionError::EmptyDeck => ApiError::EmptyDeck,
            SessionError::NotFlipped => ApiError::NotFlipped,
            SessionError::Complete => ApiError::SessionComplete,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Deck/Card/Session not found".to_string()),
            ApiError::EmptyContent(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::EmptyDeck => (StatusCode::UNPROCESSABLE_ENTITY, "Deck has no cards to study".to_string()),
            ApiError::NotFlipped => (StatusCode::CONFLICT, "Card must be flipped before grading".to_string()),
            ApiError::SessionComplete => (StatusCode::CONFLICT, "Study session is already complete".to_string()),
            ApiError::InvalidContent(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InvalidCredentials(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
