use crate::db::DbPool;
use crate::models::Deck;
use crate::schema::{cards, decks};
use anyhow::{Result, anyhow};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{instrument, debug, info};

/// Lists all decks, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Decks ordered by creation time
/// descending
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_decks(pool: &DbPool) -> Result<Vec<Deck>> {
    debug!("Listing all decks");

    let conn = &mut pool.get()?;

    let results = decks::table
        .order_by(decks::created_at.desc())
        .load::<Deck>(conn)?;

    debug!("Retrieved {} decks", results.len());

    Ok(results)
}

/// Creates a new deck in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `name` - The display name for the deck
/// * `description` - An optional description
/// * `color` - An optional gradient class; a random one is picked when absent
///
/// ### Returns
///
/// A Result containing the newly created Deck if successful
///
/// ### Errors
///
/// Returns an error if:
/// - The name trims to empty
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool), fields(name = %name))]
pub fn create_deck(
    pool: &DbPool,
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Result<Deck> {
    debug!("Creating new deck");

    if name.trim().is_empty() {
        return Err(anyhow!("Deck name must not be empty"));
    }

    let conn = &mut pool.get()?;

    let new_deck = Deck::new(name, description, color);
    let new_deck_id = new_deck.get_id();

    diesel::insert_into(decks::table)
        .values(new_deck.clone())
        .execute(conn)?;

    info!("Successfully created deck with id: {}", new_deck_id);

    Ok(new_deck)
}

/// Retrieves a deck from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Deck if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the deck not existing
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn get_deck(pool: &DbPool, deck_id: &str) -> Result<Option<Deck>> {
    debug!("Retrieving deck by id");

    let conn = &mut pool.get()?;

    let result = decks::table
        .find(deck_id)
        .first::<Deck>(conn)
        .optional()?;

    if result.is_some() {
        debug!("Deck found");
    } else {
        debug!("Deck not found");
    }

    Ok(result)
}

/// Updates a deck's name, description and color
///
/// The deck's id, creation timestamp and card count are never touched here.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to update
/// * `name` - The new display name
/// * `description` - The new description
/// * `color` - The new color; the current color is kept when None
///
/// ### Returns
///
/// A Result containing the updated Deck
///
/// ### Errors
///
/// Returns an error if:
/// - The name trims to empty
/// - The deck does not exist
/// - The database update operation fails
#[instrument(skip(pool), fields(deck_id = %deck_id, name = %name))]
pub fn update_deck(
    pool: &DbPool,
    deck_id: &str,
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Result<Deck> {
    debug!("Updating deck");

    if name.trim().is_empty() {
        return Err(anyhow!("Deck name must not be empty"));
    }

    let existing = get_deck(pool, deck_id)?.ok_or_else(|| anyhow!("Deck not found"))?;
    let color = color.unwrap_or_else(|| existing.get_color());

    let conn = &mut pool.get()?;

    diesel::update(decks::table.find(deck_id.to_string()))
        .set((
            decks::name.eq(name),
            decks::description.eq(description),
            decks::color.eq(color),
        ))
        .execute(conn)?;

    debug!("Successfully updated deck");

    get_deck(pool, deck_id)?.ok_or_else(|| anyhow!("Deck not found"))
}

/// Deletes a deck and all its cards
///
/// The deck row and every card referencing it are removed in a single
/// transaction so a failure leaves both intact.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - The deck does not exist
/// - The database delete operation fails
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn delete_deck(pool: &DbPool, deck_id: &str) -> Result<()> {
    debug!("Deleting deck and its cards");

    let conn = &mut pool.get()?;

    conn.transaction::<_, anyhow::Error, _>(|conn| {
        let removed_cards = diesel::delete(cards::table.filter(cards::deck_id.eq(deck_id)))
            .execute(conn)?;

        let removed_decks = diesel::delete(decks::table.find(deck_id.to_string()))
            .execute(conn)?;

        if removed_decks == 0 {
            return Err(anyhow!("Deck not found"));
        }

        info!("Deleted deck {} and {} cards", deck_id, removed_cards);
        Ok(())
    })
}

/// Recomputes a deck's cached card count from its card rows
///
/// This is the single place the `card_count == number of cards` invariant is
/// maintained; every card-mutating transaction calls it before committing.
///
/// ### Arguments
///
/// * `conn` - The connection of the enclosing transaction
/// * `deck_id` - The ID of the deck to refresh
pub fn refresh_card_count(conn: &mut SqliteConnection, deck_id: &str) -> Result<()> {
    let count: i64 = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .count()
        .get_result(conn)?;

    diesel::update(decks::table.find(deck_id.to_string()))
        .set(decks::card_count.eq(count as i32))
        .execute(conn)?;

    Ok(())
}
