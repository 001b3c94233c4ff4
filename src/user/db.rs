//! Database operations for users.
//!
//! Every function runs a single parameterized statement against the `user`
//! table on the connection it is given.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    user::{Email, User, UserId, UserName},
};

/// Insert a user and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if another user already has `email`, or
/// [Error::SqlError] if any other SQL related error occurred.
pub fn insert_user(name: UserName, email: Email, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, email) VALUES (?1, ?2);",
        (name.as_ref(), email.as_ref()),
    )?;

    let id = UserId::new(connection.last_insert_rowid());

    Ok(User { id, name, email })
}

/// Retrieve a single user by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no user with `user_id`.
pub fn get_user(user_id: UserId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email FROM user WHERE id = :id;")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single user by ID, or `None` if there is no such user.
///
/// # Errors
///
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn find_user(user_id: UserId, connection: &Connection) -> Result<Option<User>, Error> {
    connection
        .prepare("SELECT id, name, email FROM user WHERE id = :id;")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all users in the order they were added.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, name, email FROM user ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the name and email of the user with `user_id`.
///
/// Returns the number of updated rows, which is zero when there is no user
/// with `user_id`. That is not treated as an error.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if a different user already has `email`.
pub fn update_user(
    user_id: UserId,
    name: UserName,
    email: Email,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE user SET name = ?1, email = ?2 WHERE id = ?3",
            (name.as_ref(), email.as_ref(), user_id.as_i64()),
        )
        .map_err(|error| error.into())
}

/// Delete the user with `user_id`.
///
/// Returns the number of deleted rows, which is zero when there is no user
/// with `user_id`. That is not treated as an error.
pub fn delete_user(user_id: UserId, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM user WHERE id = ?1", [user_id.as_i64()])
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the user table if it does not exist.
///
/// `AUTOINCREMENT` stops SQLite from handing out the ID of a deleted user
/// again.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 100),
            email TEXT NOT NULL UNIQUE CHECK (length(email) BETWEEN 1 AND 100)
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = UserId::new(row.get(0)?);
    let raw_name: String = row.get(1)?;
    let raw_email: String = row.get(2)?;

    Ok(User {
        id,
        name: UserName::new_unchecked(&raw_name),
        email: Email::new_unchecked(&raw_email),
    })
}
