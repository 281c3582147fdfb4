//! The `/users` resource.

pub mod handlers;

use axum::http::Method;

use crate::routing::RouteTable;
use self::handlers::{create_user, list_users};

/// Table holding user records.
pub const USERS_TABLE: &str = "users";

/// Route table served by the API listener.
pub fn routes() -> RouteTable {
    RouteTable::new()
        .register(Method::GET, "/users", list_users)
        .register(Method::POST, "/users", create_user)
}
