//! The page for editing a user and the endpoint its form posts to.

use axum::{
    Form,
    extract::{FromRef, Query, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, ConnectionPool, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        link,
    },
    routing::redirect_to,
    user::{
        Email, User, UserId, UserName,
        domain::{UserForm, UserIdQuery},
        find_user, update_user,
    },
};

/// The state needed for the edit user page and endpoint.
#[derive(Debug, Clone)]
pub struct EditUserState {
    pub pool: ConnectionPool,
}

impl FromRef<AppState> for EditUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
        }
    }
}

/// Render the edit form for the user given by the `id` query parameter.
///
/// Without an ID the client is sent back to the users page. An ID that does
/// not belong to a user renders a "not found" message instead of the form.
pub async fn get_edit_user_page(
    State(state): State<EditUserState>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let Some(raw_id) = query.raw_id() else {
        return redirect_to(endpoints::USERS);
    };

    let user_id = match raw_id.parse::<UserId>() {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!("{error}");
            return user_not_found_view().into_response();
        }
    };

    match load_user(&state.pool, user_id).await {
        Ok(Some(user)) => edit_user_view(&user).into_response(),
        Ok(None) => user_not_found_view().into_response(),
        Err(error) => error.into_error_page("Could not fetch the user."),
    }
}

/// Handle the edit user form submission.
///
/// The client is redirected to the users page when a field is missing, when
/// the user was updated, and when no user has the given ID. A body that
/// cannot be read as a form counts as one with every field missing.
pub async fn update_user_endpoint(
    State(state): State<EditUserState>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let form = UserForm::from_submission(form);

    if form.id.trim().is_empty() {
        return redirect_to(endpoints::USERS);
    }

    let (name, email) = match form.validate() {
        Ok(fields) => fields,
        Err(error) => {
            tracing::debug!("not updating user {}: {error}", form.id);
            return redirect_to(endpoints::USERS);
        }
    };

    let user_id = match form.id.parse::<UserId>() {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!("{error}");
            return redirect_to(endpoints::USERS);
        }
    };

    match save_user(&state.pool, user_id, name, email).await {
        Ok(0) => {
            tracing::debug!("No user with ID {user_id} to update");
            redirect_to(endpoints::USERS)
        }
        Ok(_) => redirect_to(endpoints::USERS),
        Err(error) => error.into_error_page("Could not update the user."),
    }
}

async fn load_user(pool: &ConnectionPool, user_id: UserId) -> Result<Option<User>, Error> {
    let connection = pool.acquire().await?;

    connection
        .interact(move |connection| find_user(user_id, connection))
        .await?
}

async fn save_user(
    pool: &ConnectionPool,
    user_id: UserId,
    name: UserName,
    email: Email,
) -> Result<usize, Error> {
    let connection = pool.acquire().await?;

    connection
        .interact(move |connection| update_user(user_id, name, email, connection))
        .await?
}

fn edit_user_view(user: &User) -> Markup {
    let content = html! {
        h2 { "Edit User" }
        (edit_user_form_view(user))
        (link(endpoints::USERS, "Cancel"))
    };

    base("Edit User", &content)
}

fn edit_user_form_view(user: &User) -> Markup {
    html! {
        form action=(endpoints::EDIT_USER) method="post"
        {
            input type="hidden" name="id" value=(user.id);

            label for="name" class=(FORM_LABEL_STYLE) { "Name" }
            input
                id="name"
                type="text"
                name="name"
                value=(user.name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);

            label for="email" class=(FORM_LABEL_STYLE) { "Email" }
            input
                id="email"
                type="email"
                name="email"
                value=(user.email)
                required
                class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
        }
    }
}

fn user_not_found_view() -> Markup {
    let content = html! {
        h2 { "Edit User" }
        p class=(FORM_ERROR_STYLE) { "User not found" }
        (link(endpoints::USERS, "Back"))
    };

    base("User Not Found", &content)
}
