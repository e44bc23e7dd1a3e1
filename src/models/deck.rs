use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The gradient classes a new deck can be assigned when no color is chosen
pub const DECK_COLORS: [&str; 8] = [
    "from-blue-500 to-blue-600",
    "from-purple-500 to-purple-600",
    "from-pink-500 to-pink-600",
    "from-green-500 to-green-600",
    "from-orange-500 to-orange-600",
    "from-teal-500 to-teal-600",
    "from-red-500 to-red-600",
    "from-indigo-500 to-indigo-600",
];

/// Represents a deck of flashcards
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::decks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Deck {
    /// Unique identifier for the deck (UUID v4 as string)
    id: String,

    /// Display name of the deck
    name: String,

    /// Optional free-text description
    description: Option<String>,

    /// When this deck was created
    created_at: NaiveDateTime,

    /// Cached number of cards in this deck; maintained by the repository
    /// layer on every card mutation
    card_count: i32,

    /// CSS gradient class for the deck header
    color: String,
}

impl Deck {
    /// Creates a new deck
    ///
    /// ### Arguments
    ///
    /// * `name` - The display name of the deck
    /// * `description` - An optional description
    /// * `color` - An optional gradient class; a random one from
    ///   [`DECK_COLORS`] is chosen when absent
    ///
    /// ### Returns
    ///
    /// A new `Deck` with a fresh id, the current timestamp and zero cards
    pub fn new(name: String, description: Option<String>, color: Option<String>) -> Self {
        let color = color.unwrap_or_else(|| {
            DECK_COLORS
                .choose(&mut rand::rng())
                .map(|c| c.to_string())
                .unwrap_or_else(|| DECK_COLORS[0].to_string())
        });
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            created_at: Utc::now().naive_utc(),
            card_count: 0,
            color,
        }
    }

    /// Gets the deck's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the deck's name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Sets the deck's name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Gets the deck's description
    pub fn get_description(&self) -> Option<String> {
        self.description.clone()
    }

    /// Sets the deck's description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Gets the deck's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Gets the cached card count
    pub fn get_card_count(&self) -> i32 {
        self.card_count
    }

    /// Gets the deck's color gradient class
    pub fn get_color(&self) -> String {
        self.color.clone()
    }

    /// Sets the deck's color gradient class
    pub fn set_color(&mut self, color: String) {
        self.color = color;
    }
}
