//! Identity bootstrap and session routes.
//!
//! Authentication itself lives with the external identity provider; these
//! routes verify provider-issued session tokens and keep the local user row
//! in sync with the provider's profile.

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod get;
pub mod post;
pub mod put;

use get::me;
use post::authenticate;
use put::set_role;

/// Routes:
/// - `POST /auth/authenticate` → Find-or-create the local user for a session
/// - `GET  /auth/me`           → Current local user
/// - `PUT  /auth/role`         → Role selection (local row + provider metadata)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(authenticate))
        .route("/me", get(me))
        .route("/role", put(set_role))
}
