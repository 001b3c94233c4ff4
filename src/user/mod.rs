//! Users: their domain types, database operations and pages.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_user_endpoint, get_add_user_page};
pub use db::{
    count_users, create_user_table, delete_user, find_user, get_all_users, get_user, insert_user,
    update_user,
};
pub use delete::delete_user_endpoint;
pub use domain::{Email, User, UserId, UserName};
pub use edit::{get_edit_user_page, update_user_endpoint};
pub use list::get_users_page;
