use crate::db::DbPool;
use crate::models::{Card, CardContent, Difficulty};
use crate::schema::{cards, decks};
use anyhow::{Result, anyhow};
use diesel::dsl::min;
use diesel::prelude::*;
use tracing::{instrument, debug, info};

use super::refresh_card_count;

/// Lists all cards in a deck, most recently added first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to list cards for
///
/// ### Returns
///
/// A Result containing a vector of the deck's Cards in display order
///
/// ### Errors
///
/// Returns an error if:
/// - The deck does not exist
/// - The database query fails
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn list_cards(pool: &DbPool, deck_id: &str) -> Result<Vec<Card>> {
    debug!("Listing cards for deck");

    let conn = &mut pool.get()?;

    let deck_exists: bool = decks::table
        .find(deck_id)
        .count()
        .get_result::<i64>(conn)? > 0;

    if !deck_exists {
        info!("Deck not found: {}", deck_id);
        return Err(anyhow!("Deck not found"));
    }

    // New cards take the smallest position, so ascending order lists them first
    let results = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .order_by(cards::position.asc())
        .load::<Card>(conn)?;

    debug!("Retrieved {} cards for deck {}", results.len(), deck_id);

    Ok(results)
}

/// Creates a new card at the front of a deck
///
/// The insert and the deck's card-count refresh run in one transaction.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck the card belongs to
/// * `front` - The question side
/// * `back` - The answer side
/// * `difficulty` - The initial difficulty
///
/// ### Returns
///
/// A Result containing the newly created Card if successful
///
/// ### Errors
///
/// Returns an error if:
/// - The deck does not exist
/// - Either side is empty
/// - The database insert operation fails
#[instrument(skip(pool, front, back), fields(deck_id = %deck_id))]
pub fn create_card(
    pool: &DbPool,
    deck_id: &str,
    front: CardContent,
    back: CardContent,
    difficulty: Difficulty,
) -> Result<Card> {
    debug!("Creating new card");

    if !front.is_non_empty() || !back.is_non_empty() {
        return Err(anyhow!("Card front and back must not be empty"));
    }

    let conn = &mut pool.get()?;

    let new_card = conn.transaction::<_, anyhow::Error, _>(|conn| {
        let deck_exists: bool = decks::table
            .find(deck_id)
            .count()
            .get_result::<i64>(conn)? > 0;

        if !deck_exists {
            return Err(anyhow!("Deck not found"));
        }

        let front_position: Option<i32> = cards::table
            .filter(cards::deck_id.eq(deck_id))
            .select(min(cards::position))
            .first(conn)?;
        let position = front_position.map_or(0, |p| p - 1);

        let new_card = Card::new(deck_id.to_string(), front, back, difficulty, position);

        diesel::insert_into(cards::table)
            .values(new_card.clone())
            .execute(conn)?;

        refresh_card_count(conn, deck_id)?;

        Ok(new_card)
    })?;

    info!("Successfully created card with id: {}", new_card.get_id());

    Ok(new_card)
}

/// Retrieves a card by its ID within a deck
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck the card belongs to
/// * `card_id` - The ID of the card to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Card if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the card not existing
#[instrument(skip(pool), fields(deck_id = %deck_id, card_id = %card_id))]
pub fn get_card(pool: &DbPool, deck_id: &str, card_id: &str) -> Result<Option<Card>> {
    debug!("Retrieving card by id");

    let conn = &mut pool.get()?;

    let result = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .filter(cards::id.eq(card_id))
        .first::<Card>(conn)
        .optional()?;

    if result.is_some() {
        debug!("Card found");
    } else {
        debug!("Card not found");
    }

    Ok(result)
}

/// Updates a card's content and difficulty
///
/// The card's id, creation timestamp, position and review history are
/// preserved; the deck's card count is unaffected.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck the card belongs to
/// * `card_id` - The ID of the card to update
/// * `front` - The new question side
/// * `back` - The new answer side
/// * `difficulty` - The new difficulty
///
/// ### Returns
///
/// A Result containing the updated Card
///
/// ### Errors
///
/// Returns an error if:
/// - The card does not exist in the deck
/// - Either side is empty
/// - The database update operation fails
#[instrument(skip(pool, front, back), fields(deck_id = %deck_id, card_id = %card_id))]
pub fn update_card(
    pool: &DbPool,
    deck_id: &str,
    card_id: &str,
    front: CardContent,
    back: CardContent,
    difficulty: Difficulty,
) -> Result<Card> {
    debug!("Updating card");

    if !front.is_non_empty() || !back.is_non_empty() {
        return Err(anyhow!("Card front and back must not be empty"));
    }

    let conn = &mut pool.get()?;

    let updated = diesel::update(
        cards::table
            .filter(cards::deck_id.eq(deck_id))
            .filter(cards::id.eq(card_id)),
    )
    .set((
        cards::front.eq(front),
        cards::back.eq(back),
        cards::difficulty.eq(difficulty),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(anyhow!("Card not found"));
    }

    debug!("Successfully updated card");

    get_card(pool, deck_id, card_id)?.ok_or_else(|| anyhow!("Card not found"))
}

/// Persists a study-graded card back into its deck
///
/// Only the difficulty and last-reviewed timestamp are written; everything
/// else belongs to the editing path.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card` - The graded card from the session snapshot
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if the database update fails. A card deleted mid-session
/// is not an error; the grade simply has nothing left to land on.
#[instrument(skip(pool, card), fields(card_id = %card.get_id()))]
pub fn save_reviewed_card(pool: &DbPool, card: &Card) -> Result<()> {
    debug!("Persisting graded card");

    let conn = &mut pool.get()?;

    diesel::update(cards::table.find(card.get_id()))
        .set((
            cards::difficulty.eq(card.get_difficulty()),
            cards::last_reviewed.eq(card.get_last_reviewed_raw()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Deletes a card from a deck
///
/// The delete and the deck's card-count refresh run in one transaction.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck the card belongs to
/// * `card_id` - The ID of the card to delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - The card does not exist in the deck
/// - The database delete operation fails
#[instrument(skip(pool), fields(deck_id = %deck_id, card_id = %card_id))]
pub fn delete_card(pool: &DbPool, deck_id: &str, card_id: &str) -> Result<()> {
    debug!("Deleting card");

    let conn = &mut pool.get()?;

    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let removed = diesel::delete(
            cards::table
                .filter(cards::deck_id.eq(deck_id))
                .filter(cards::id.eq(card_id)),
        )
        .execute(conn)?;

        if removed == 0 {
            return Err(anyhow!("Card not found"));
        }

        refresh_card_count(conn, deck_id)?;

        info!("Deleted card {} from deck {}", card_id, deck_id);
        Ok(())
    })
}
