//! The home page, which greets the client with the name of the serving host.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{base, link},
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    pub host_name: String,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            host_name: state.host_name.clone(),
        }
    }
}

/// Render the home page.
pub async fn get_home_page(State(state): State<HomePageState>) -> Response {
    home_view(&state.host_name).into_response()
}

fn home_view(host_name: &str) -> Markup {
    let content = html! {
        h2 { "Server: " (host_name) }
        (link(endpoints::USERS, "View users"))
        (link(endpoints::ADD_USER, "Add user"))
    };

    base("Home", &content)
}
