//! The API endpoints URIs.
//!
//! Endpoints that act on a single user take the user's ID as the `id` query
//! parameter, use [with_user_id] to build the URI.

use crate::user::UserId;

/// The home page, which greets the client with the server's host name.
pub const ROOT: &str = "/";
/// The page listing every user.
pub const USERS: &str = "/users";
/// The page with the form for adding a user, and the form's target.
pub const ADD_USER: &str = "/add-user";
/// The page with the form for editing a user, and the form's target.
pub const EDIT_USER: &str = "/edit-user";
/// The route for deleting a user.
pub const DELETE_USER: &str = "/delete-user";

/// Append `user_id` to `endpoint_path` as the `id` query parameter.
pub fn with_user_id(endpoint_path: &str, user_id: UserId) -> String {
    format!("{endpoint_path}?id={user_id}")
}
