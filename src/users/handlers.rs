use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Map;

use crate::http::request::RequestContext;
use crate::http::response;
use crate::store::{Record, RecordStore};
use crate::users::USERS_TABLE;

/// Fields copied from a create request into the stored record.
const USER_FIELDS: &[&str] = &["name", "email"];

/// `GET /users`: the whole table, in insertion order.
pub fn list_users(_ctx: &RequestContext, store: &RecordStore) -> Response {
    let users = store.select(USERS_TABLE);
    response::json(StatusCode::OK, &users)
}

/// `POST /users`: store `name` and `email` under a fresh id.
///
/// Fields missing from the body are left out of the record; nothing is
/// rejected.
pub fn create_user(ctx: &RequestContext, store: &RecordStore) -> Response {
    let mut fields = Map::new();
    for &name in USER_FIELDS {
        if let Some(value) = ctx.field(name) {
            fields.insert(name.to_string(), value.clone());
        }
    }

    let record = Record::new(fields);
    tracing::info!(request_id = %ctx.request_id, id = %record.id, "User created");
    store.insert(USERS_TABLE, record);

    response::empty(StatusCode::CREATED)
}
