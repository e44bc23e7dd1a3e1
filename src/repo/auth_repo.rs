use crate::db::DbPool;
use crate::models::AuthRecord;
use crate::schema::auth_state;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{instrument, debug, info};

/// Retrieves the current sign-in record, if any
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing an Option with the AuthRecord if signed in
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn get_auth(pool: &DbPool) -> Result<Option<AuthRecord>> {
    debug!("Retrieving sign-in record");

    let conn = &mut pool.get()?;

    let result = auth_state::table
        .first::<AuthRecord>(conn)
        .optional()?;

    Ok(result)
}

/// Saves a fresh sign-in record, replacing any existing one
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `email` - The email of the signed-in user
///
/// ### Returns
///
/// A Result containing the stored AuthRecord
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database write fails
#[instrument(skip(pool), fields(email = %email))]
pub fn save_auth(pool: &DbPool, email: String) -> Result<AuthRecord> {
    debug!("Saving sign-in record");

    let conn = &mut pool.get()?;

    let record = AuthRecord::new(email);

    diesel::replace_into(auth_state::table)
        .values(record.clone())
        .execute(conn)?;

    info!("Signed in as {}", record.get_email());

    Ok(record)
}

/// Clears the sign-in record
///
/// Logging out when already logged out is not an error.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
#[instrument(skip(pool))]
pub fn clear_auth(pool: &DbPool) -> Result<()> {
    debug!("Clearing sign-in record");

    let conn = &mut pool.get()?;

    diesel::delete(auth_state::table).execute(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests;
