//! User directory routes.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::{get_user, list_supervisors, list_users};

/// Routes:
/// - `GET /users`             → All users as compact summaries
/// - `GET /users/supervisors` → Users with the supervisor role
/// - `GET /users/{user_id}`   → Single user
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/supervisors", get(list_supervisors))
        .route("/{user_id}", get(get_user))
}
