//! Application router configuration.

use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, endpoints,
    home::get_home_page,
    not_found::get_404_not_found,
    user::{
        create_user_endpoint, delete_user_endpoint, get_add_user_page, get_edit_user_page,
        get_users_page, update_user_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::USERS, get(get_users_page))
        .route(
            endpoints::ADD_USER,
            get(get_add_user_page).post(create_user_endpoint),
        )
        .route(
            endpoints::EDIT_USER,
            get(get_edit_user_page).post(update_user_endpoint),
        )
        .route(endpoints::DELETE_USER, get(delete_user_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Get a response that redirects the client to `endpoint` with a 302 Found.
pub(crate) fn redirect_to(endpoint: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, endpoint)]).into_response()
}
