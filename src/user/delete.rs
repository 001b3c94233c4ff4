//! User deletion endpoint.

use axum::{
    extract::{FromRef, Query, State},
    response::Response,
};

use crate::{
    AppState, ConnectionPool, Error, endpoints,
    routing::redirect_to,
    user::{UserId, delete_user, domain::UserIdQuery},
};

/// The state needed for deleting a user.
#[derive(Debug, Clone)]
pub struct DeleteUserState {
    pub pool: ConnectionPool,
}

impl FromRef<AppState> for DeleteUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
        }
    }
}

/// Delete the user given by the `id` query parameter and redirect to the
/// users page.
///
/// A missing ID, or one that does not belong to a user, is not an error.
pub async fn delete_user_endpoint(
    State(state): State<DeleteUserState>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let Some(raw_id) = query.raw_id() else {
        return redirect_to(endpoints::USERS);
    };

    let user_id = match raw_id.parse::<UserId>() {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!("{error}");
            return redirect_to(endpoints::USERS);
        }
    };

    match remove_user(&state.pool, user_id).await {
        Ok(0) => {
            tracing::debug!("No user with ID {user_id} to delete");
            redirect_to(endpoints::USERS)
        }
        Ok(_) => redirect_to(endpoints::USERS),
        Err(error) => error.into_error_page("Could not delete the user."),
    }
}

async fn remove_user(pool: &ConnectionPool, user_id: UserId) -> Result<usize, Error> {
    let connection = pool.acquire().await?;

    connection
        .interact(move |connection| delete_user(user_id, connection))
        .await?
}
