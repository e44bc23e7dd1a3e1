/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database, including
/// creating, retrieving, and updating decks, cards and the sign-in record.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod deck_repo;
mod card_repo;
mod auth_repo;

// Re-export all repository functions
pub use deck_repo::*;
pub use card_repo::*;
pub use auth_repo::*;
