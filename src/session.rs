use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Card;

/// Errors produced by the study-session state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot study an empty deck")]
    EmptyDeck,
    #[error("card must be flipped before grading")]
    NotFlipped,
    #[error("session is already complete")]
    Complete,
}

/// An in-progress study pass over one deck
///
/// The session snapshots a shuffled copy of the deck's cards at start time;
/// edits to the deck made while studying do not disturb the ordering. The
/// machine walks the snapshot one card at a time: flip to reveal the answer,
/// grade to record the result and advance. Once the last card is graded the
/// session is complete and only `restart` can revive it.
///
/// Grading mutates the snapshot copy and hands the updated card back to the
/// caller, which is responsible for persisting it into the deck so future
/// sessions see the new difficulty.
#[derive(Debug, Clone)]
pub struct StudySession {
    id: String,
    deck_id: String,
    cards: Vec<Card>,
    current_index: usize,
    studied_count: usize,
    flipped: bool,
    complete: bool,
}

impl StudySession {
    /// Starts a session over the given cards
    ///
    /// The cards are shuffled into a uniformly random order.
    ///
    /// ### Errors
    ///
    /// Returns `SessionError::EmptyDeck` if `cards` is empty.
    pub fn start(deck_id: String, mut cards: Vec<Card>) -> Result<Self, SessionError> {
        if cards.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        cards.shuffle(&mut rand::rng());
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            deck_id,
            cards,
            current_index: 0,
            studied_count: 0,
            flipped: false,
            complete: false,
        })
    }

    /// Gets the session's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the deck being studied
    pub fn get_deck_id(&self) -> String {
        self.deck_id.clone()
    }

    /// Gets the zero-based index of the current card
    pub fn get_current_index(&self) -> usize {
        self.current_index
    }

    /// Gets the number of cards graded so far
    pub fn get_studied_count(&self) -> usize {
        self.studied_count
    }

    /// Gets the number of cards in the snapshot
    pub fn get_total(&self) -> usize {
        self.cards.len()
    }

    /// Whether the current card shows its answer side
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Whether every card in the snapshot has been graded
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The current card, or None once the session is complete
    pub fn current_card(&self) -> Option<&Card> {
        if self.complete {
            None
        } else {
            self.cards.get(self.current_index)
        }
    }

    /// Toggles the current card between question and answer side
    ///
    /// ### Errors
    ///
    /// Returns `SessionError::Complete` if the session has finished.
    pub fn flip(&mut self) -> Result<(), SessionError> {
        if self.complete {
            return Err(SessionError::Complete);
        }
        self.flipped = !self.flipped;
        Ok(())
    }

    /// Grades the current card and advances
    ///
    /// Stamps the review on the snapshot copy and returns it so the caller
    /// can persist the new difficulty into the deck. After the last card the
    /// session becomes complete.
    ///
    /// ### Errors
    ///
    /// Returns `SessionError::Complete` if the session has finished, or
    /// `SessionError::NotFlipped` if the answer has not been revealed.
    pub fn grade(&mut self, remembered: bool, now: DateTime<Utc>) -> Result<Card, SessionError> {
        if self.complete {
            return Err(SessionError::Complete);
        }
        if !self.flipped {
            return Err(SessionError::NotFlipped);
        }

        let card = &mut self.cards[self.current_index];
        card.record_review(remembered, now);
        let graded = card.clone();

        self.studied_count += 1;
        self.flipped = false;
        if self.current_index + 1 == self.cards.len() {
            self.complete = true;
        } else {
            self.current_index += 1;
        }

        Ok(graded)
    }

    /// Restarts the session over a fresh card list
    ///
    /// The caller passes the deck's current cards; they are reshuffled and
    /// the walk starts over. Valid both mid-session and after completion.
    ///
    /// ### Errors
    ///
    /// Returns `SessionError::EmptyDeck` if `cards` is empty.
    pub fn restart(&mut self, mut cards: Vec<Card>) -> Result<(), SessionError> {
        if cards.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        cards.shuffle(&mut rand::rng());
        self.cards = cards;
        self.current_index = 0;
        self.studied_count = 0;
        self.flipped = false;
        self.complete = false;
        Ok(())
    }
}
