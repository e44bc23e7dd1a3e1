use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CardContent, Difficulty};

/// Represents a flashcard belonging to a deck
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    /// Unique identifier for the card (UUID v4 as string)
    id: String,

    /// The ID of the deck this card belongs to
    deck_id: String,

    /// Question side, stored as JSON TEXT
    front: CardContent,

    /// Answer side, stored as JSON TEXT
    back: CardContent,

    /// When this card was created
    created_at: NaiveDateTime,

    /// When this card was last graded in a study session
    last_reviewed: Option<NaiveDateTime>,

    /// Self-assessed difficulty
    difficulty: Difficulty,

    /// Sort key within the deck; new cards take the smallest value so the
    /// deck lists most-recent-first
    position: i32,
}

impl Card {
    /// Creates a new card for a deck
    ///
    /// ### Arguments
    ///
    /// * `deck_id` - The ID of the deck this card belongs to
    /// * `front` - The question side
    /// * `back` - The answer side
    /// * `difficulty` - The initial difficulty
    /// * `position` - The sort key within the deck
    ///
    /// ### Returns
    ///
    /// A new `Card` with a fresh id, the current timestamp and no review
    /// history
    pub fn new(
        deck_id: String,
        front: CardContent,
        back: CardContent,
        difficulty: Difficulty,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            deck_id,
            front,
            back,
            created_at: Utc::now().naive_utc(),
            last_reviewed: None,
            difficulty,
            position,
        }
    }

    /// Gets the card's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the deck this card belongs to
    pub fn get_deck_id(&self) -> String {
        self.deck_id.clone()
    }

    /// Gets the question side
    pub fn get_front(&self) -> CardContent {
        self.front.clone()
    }

    /// Sets the question side
    pub fn set_front(&mut self, front: CardContent) {
        self.front = front;
    }

    /// Gets the answer side
    pub fn get_back(&self) -> CardContent {
        self.back.clone()
    }

    /// Sets the answer side
    pub fn set_back(&mut self, back: CardContent) {
        self.back = back;
    }

    /// Gets the card's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Gets the card's last review timestamp as a DateTime<Utc>
    pub fn get_last_reviewed(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the card's raw last review timestamp
    pub fn get_last_reviewed_raw(&self) -> Option<NaiveDateTime> {
        self.last_reviewed
    }

    /// Gets the card's difficulty
    pub fn get_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Sets the card's difficulty
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Gets the card's sort key within its deck
    pub fn get_position(&self) -> i32 {
        self.position
    }

    /// Records a study answer on this card
    ///
    /// Stamps `last_reviewed` and moves the difficulty by the grading rule:
    /// remembered cards become easy, forgotten ones slide toward hard.
    pub fn record_review(&mut self, remembered: bool, now: DateTime<Utc>) {
        self.last_reviewed = Some(now.naive_utc());
        self.difficulty = self.difficulty.graded(remembered);
    }
}
