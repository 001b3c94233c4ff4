//! The page listing every user.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, ConnectionPool, Error, endpoints,
    html::{LIST_ACTIONS_STYLE, LIST_ITEM_STYLE, base, link},
    user::{User, get_all_users},
};

/// The state needed for the users page.
#[derive(Debug, Clone)]
pub struct UsersPageState {
    pub pool: ConnectionPool,
}

impl FromRef<AppState> for UsersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
        }
    }
}

/// Render the list of users.
///
/// A database failure renders the error page instead of the list.
pub async fn get_users_page(State(state): State<UsersPageState>) -> Response {
    let users = match load_users(&state.pool).await {
        Ok(users) => users,
        Err(error) => return error.into_error_page("Could not fetch users."),
    };

    users_view(&users).into_response()
}

async fn load_users(pool: &ConnectionPool) -> Result<Vec<User>, Error> {
    let connection = pool.acquire().await?;

    connection.interact(get_all_users).await?
}

fn users_view(users: &[User]) -> Markup {
    let content = html! {
        h2 { "Users" }

        ul
        {
            @for user in users {
                li class=(LIST_ITEM_STYLE)
                {
                    div { (user.id) ": " (user.name) " (" (user.email) ")" }

                    div class=(LIST_ACTIONS_STYLE)
                    {
                        (link(&endpoints::with_user_id(endpoints::EDIT_USER, user.id), "Edit"))
                        (link(&endpoints::with_user_id(endpoints::DELETE_USER, user.id), "Delete"))
                    }
                }
            }
        }

        (link(endpoints::ADD_USER, "Add user"))
        (link(endpoints::ROOT, "Back"))
    };

    base("Users", &content)
}
