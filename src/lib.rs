/// Engram: A Flashcard Study Library
///
/// This library provides the core functionality for a flashcard study tool,
/// including data models, database access, a rendering pipeline for rich
/// card content, an in-memory study-session state machine, and a web API
/// with server-rendered pages.
///
/// The name "Engram" refers to the physical trace a memory leaves in the
/// brain, which is fitting for a tool built around recall practice.
///
/// ### Modules
///
/// - `db`: Database connection management
/// - `models`: Data structures representing decks, cards and rich content
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
/// - `session`: The shuffle/flip/grade study-session state machine
/// - `render`: Sanitized, typeset display output for card content
/// - `auth`: The pluggable authentication seam
/// - `views`: Server-rendered HTML pages
/// - `handlers`: Axum handlers for the JSON API and the pages
///
/// ### Web API
///
/// The JSON API lives under `/api`; the HTML pages are served at root paths
/// (`/`, `/decks/{id}`, `/decks/{id}/study`, `/login`, `/signup`).

/// Pluggable authentication backends
pub mod auth;

/// Configuration loading and merging
pub mod config;

/// Database connection module
pub mod db;

/// Data transfer objects for the web API
pub mod dto;

/// API error taxonomy
pub mod errors;

/// Web API and page handlers
pub mod handlers;

/// Data models module
pub mod models;

/// Rendering pipeline for card content
pub mod render;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Study session state machine
pub mod session;

/// Server-rendered HTML views
pub mod views;

#[cfg(test)]
pub mod test_utils;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::auth::AuthProvider;
use crate::render::Typesetter;
use crate::session::StudySession;

/// Shared state for all handlers
///
/// Live study sessions exist only in memory; a server restart forgets them,
/// while decks and cards survive in the database.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool
    pub pool: Arc<db::DbPool>,
    /// Live study sessions, keyed by session id
    pub sessions: Arc<Mutex<HashMap<String, StudySession>>>,
    /// The authentication backend
    pub auth: Arc<dyn AuthProvider>,
    /// The math renderer used by the pages
    pub typesetter: Arc<dyn Typesetter>,
}

impl AppState {
    pub fn new(
        pool: Arc<db::DbPool>,
        auth: Arc<dyn AuthProvider>,
        typesetter: Arc<dyn Typesetter>,
    ) -> Self {
        Self {
            pool,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            auth,
            typesetter,
        }
    }
}

/// Creates the application router
///
/// This function sets up the Axum router with the JSON API under `/api` and
/// the HTML pages at root paths.
///
/// ### Arguments
///
/// * `state` - The shared application state
///
/// ### Returns
///
/// An Axum Router configured with all routes and the application state
pub fn create_app(state: AppState) -> Router {
    use handlers::*;

    Router::new()
        // JSON API: decks
        .route("/api/decks", get(list_decks_handler).post(create_deck_handler))
        .route(
            "/api/decks/{id}",
            get(get_deck_handler)
                .put(update_deck_handler)
                .delete(delete_deck_handler),
        )
        // JSON API: cards within a deck
        .route(
            "/api/decks/{deck_id}/cards",
            get(list_cards_handler).post(create_card_handler),
        )
        .route(
            "/api/decks/{deck_id}/cards/{card_id}",
            put(update_card_handler).delete(delete_card_handler),
        )
        // JSON API: study sessions
        .route("/api/decks/{deck_id}/study", post(start_study_handler))
        .route("/api/study/{session_id}", get(get_study_handler))
        .route("/api/study/{session_id}/flip", post(flip_study_handler))
        .route("/api/study/{session_id}/grade", post(grade_study_handler))
        .route("/api/study/{session_id}/restart", post(restart_study_handler))
        // JSON API: authentication
        .route("/api/auth", get(get_auth_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/logout", post(logout_handler))
        // HTML pages
        .route("/", get(index_page_handler))
        .route("/decks/{deck_id}", get(deck_page_handler))
        .route("/decks/{deck_id}/study", get(study_page_handler))
        .route("/study/{session_id}/flip", post(flip_page_handler))
        .route("/study/{session_id}/grade", post(grade_page_handler))
        .route("/study/{session_id}/restart", post(restart_page_handler))
        .route("/login", get(login_page_handler).post(login_submit_handler))
        .route("/signup", get(signup_page_handler).post(signup_submit_handler))
        .route("/logout", post(logout_submit_handler))
        .layer(CorsLayer::permissive())
        // Add the application state
        .with_state(state)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
