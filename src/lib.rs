//! User Manager is a small web app for keeping a list of users, each with a
//! name and a unique email address.
//!
//! This library provides a REST API that directly serves HTML pages, backed
//! by a pool of SQLite connections.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod home;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod pool;
mod routing;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pool::{ConnectionPool, DatabaseLocation, PoolConfig, PoolError, PooledConnection};
pub use routing::build_router;
pub use user::{
    Email, User, UserId, UserName, count_users, delete_user, find_user, get_all_users, get_user,
    insert_user, update_user,
};

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was missing or empty.
    ///
    /// This is handled by the request handler and never reaches the database.
    #[error("the {0} field is required")]
    MissingField(&'static str),

    /// A user ID was given that is not an integer.
    ///
    /// Such an ID cannot refer to any user, so handlers treat it the same
    /// way as an ID that is not in the database.
    #[error("\"{0}\" is not a valid user ID")]
    InvalidUserId(String),

    /// The requested user was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested user could not be found")]
    NotFound,

    /// Another user already has the email address.
    ///
    /// Raised by the database's UNIQUE constraint on `user.email`, which is
    /// also what settles concurrent inserts of the same email.
    #[error("a user with this email address already exists")]
    DuplicateEmail,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A database connection could not be acquired.
    #[error("{0}")]
    Pool(#[from] PoolError),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Render a 500 page that shows `description` and this error's message.
    ///
    /// Store and pool failures are shown to the client with their message
    /// and are not retried.
    fn into_error_page(self, description: &str) -> Response {
        tracing::error!("{description} {self}");

        let fix = self.to_string();
        InternalServerError {
            description,
            fix: &fix,
        }
        .into_response()
    }
}
