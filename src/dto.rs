use serde::{Deserialize, Serialize};

use crate::models::{Card, CardContent, Difficulty};
use crate::session::StudySession;

/// Data transfer object for creating a new deck
///
/// This struct is used to deserialize JSON requests for creating decks.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeckDto {
    /// The display name of the deck
    pub name: String,

    /// An optional description
    #[serde(default)]
    pub description: Option<String>,

    /// An optional gradient class; a random one is picked when absent
    #[serde(default)]
    pub color: Option<String>,
}

/// Data transfer object for updating an existing deck
///
/// The id, creation timestamp and card count of a deck never change through
/// this payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeckDto {
    /// The new display name
    pub name: String,

    /// The new description (absent clears it)
    #[serde(default)]
    pub description: Option<String>,

    /// The new color; the current color is kept when absent
    #[serde(default)]
    pub color: Option<String>,
}

/// Data transfer object for creating a new card
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardDto {
    /// The question side
    pub front: CardContent,

    /// The answer side
    pub back: CardContent,

    /// The initial difficulty; defaults to medium
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
}

/// Data transfer object for updating an existing card
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCardDto {
    /// The new question side
    pub front: CardContent,

    /// The new answer side
    pub back: CardContent,

    /// The new difficulty
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

/// Data transfer object for grading the current card of a study session
#[derive(Debug, Clone, Deserialize)]
pub struct GradeDto {
    /// Whether the user remembered the answer
    pub remembered: bool,
}

/// Data transfer object for login and signup requests
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

/// Snapshot of a study session returned by the study endpoints
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateDto {
    /// The session's ID
    pub id: String,

    /// The deck being studied
    pub deck_id: String,

    /// Zero-based index of the current card
    pub current_index: usize,

    /// Number of cards graded so far
    pub studied_count: usize,

    /// Number of cards in the session snapshot
    pub total: usize,

    /// Whether the current card shows its answer side
    pub flipped: bool,

    /// Whether every card has been graded
    pub complete: bool,

    /// The current card, absent once the session is complete
    pub card: Option<Card>,
}

impl From<&StudySession> for SessionStateDto {
    fn from(session: &StudySession) -> Self {
        Self {
            id: session.get_id(),
            deck_id: session.get_deck_id(),
            current_index: session.get_current_index(),
            studied_count: session.get_studied_count(),
            total: session.get_total(),
            flipped: session.is_flipped(),
            complete: session.is_complete(),
            card: session.current_card().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_card_dto_default_difficulty() {
        let dto: CreateCardDto =
            serde_json::from_str(r#"{"front":"q","back":"a"}"#).unwrap();
        assert_eq!(dto.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_create_card_dto_accepts_rich_front() {
        let dto: CreateCardDto = serde_json::from_str(
            r#"{"front":{"images":["a.png"]},"back":"a","difficulty":"hard"}"#,
        )
        .unwrap();
        assert!(matches!(dto.front, CardContent::Rich(_)));
        assert_eq!(dto.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_create_deck_dto_optional_fields() {
        let dto: CreateDeckDto = serde_json::from_str(r#"{"name":"Spanish"}"#).unwrap();
        assert_eq!(dto.name, "Spanish");
        assert!(dto.description.is_none());
        assert!(dto.color.is_none());
    }

    #[test]
    fn test_session_state_dto_from_session() {
        let cards = vec![Card::new(
            "deck1".to_string(),
            CardContent::Plain("q".to_string()),
            CardContent::Plain("a".to_string()),
            Difficulty::Medium,
            0,
        )];
        let session = StudySession::start("deck1".to_string(), cards).unwrap();
        let dto = SessionStateDto::from(&session);

        assert_eq!(dto.deck_id, "deck1");
        assert_eq!(dto.total, 1);
        assert_eq!(dto.studied_count, 0);
        assert!(!dto.flipped);
        assert!(!dto.complete);
        assert!(dto.card.is_some());
    }
}
