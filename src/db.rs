//! Schema setup for the application's database.

use rusqlite::Connection;

use crate::{Error, user::create_user_table};

/// Create the tables for the domain models if they do not exist.
///
/// Safe to run against a database that has already been initialized.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_user_table(connection)?;
    tracing::info!("Verified the user table exists.");

    Ok(())
}
