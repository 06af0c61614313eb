//! Direct-message routes. Clients poll conversations on an interval; the
//! server keeps no push channels.

use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use delete::delete_message;
use get::get_conversation;
use post::send_message;

/// Routes:
/// - `POST   /messages`                  → Send a message
/// - `GET    /messages/with/{user_id}`   → Two-way conversation with a user
/// - `DELETE /messages/{message_id}`     → Delete an own message
pub fn messages_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/with/{user_id}", get(get_conversation))
        .route("/{message_id}", delete(delete_message))
}
