/// Data models module
///
/// This module defines the core data structures used throughout the application.
/// It includes database models that map to database tables, as well as methods
/// for creating and manipulating these models.

// Re-export all model types
mod content;
pub use content::{CardContent, Difficulty, RichContent};

mod deck;
pub use deck::{Deck, DECK_COLORS};

mod card;
pub use card::Card;

mod auth_record;
pub use auth_record::AuthRecord;
