//! The page for adding a user and the endpoint its form posts to.

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
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
    user::{Email, User, UserName, domain::UserForm, insert_user},
};

/// The state needed for adding a user.
#[derive(Debug, Clone)]
pub struct CreateUserState {
    pub pool: ConnectionPool,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
        }
    }
}

/// Render the page with an empty form for adding a user.
pub async fn get_add_user_page() -> Response {
    add_user_view(&UserForm::default(), "").into_response()
}

/// Handle the add user form submission.
///
/// If the name or email is missing the form is shown again with an error
/// message and the database is not touched. Otherwise the user is inserted
/// and the client is redirected to the users page. A body that cannot be
/// read as a form counts as one with every field missing.
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let form = UserForm::from_submission(form);

    let (name, email) = match form.validate() {
        Ok(fields) => fields,
        Err(error) => {
            return add_user_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    match create_user(&state.pool, name, email).await {
        Ok(user) => {
            tracing::debug!("Added user {}", user.id);
            redirect_to(endpoints::USERS)
        }
        Err(error) => error.into_error_page("Could not add the user."),
    }
}

async fn create_user(pool: &ConnectionPool, name: UserName, email: Email) -> Result<User, Error> {
    let connection = pool.acquire().await?;

    connection
        .interact(move |connection| insert_user(name, email, connection))
        .await?
}

fn add_user_view(form: &UserForm, error_message: &str) -> Markup {
    let content = html! {
        h2 { "Add User" }
        (add_user_form_view(form, error_message))
        (link(endpoints::ROOT, "Back"))
    };

    base("Add User", &content)
}

fn add_user_form_view(form: &UserForm, error_message: &str) -> Markup {
    html! {
        form action=(endpoints::ADD_USER) method="post"
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }
            input
                id="name"
                type="text"
                name="name"
                placeholder="Name"
                value=(form.name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);

            label for="email" class=(FORM_LABEL_STYLE) { "Email" }
            input
                id="email"
                type="email"
                name="email"
                placeholder="Email"
                value=(form.email)
                required
                class=(FORM_TEXT_INPUT_STYLE);

            @if !error_message.is_empty() {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
        }
    }
}

#[cfg(test)]
mod add_user_page_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_action, assert_form_input,
            assert_form_submit_button_with_text, assert_valid_html, must_get_form,
            parse_html_document,
        },
        user::get_add_user_page,
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_add_user_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_action(&form, endpoints::ADD_USER, "post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "email", "email");
        assert_form_submit_button_with_text(&form, "Add");
    }
}
