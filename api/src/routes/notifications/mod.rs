//! Notification feed routes.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod put;

use get::{list_notifications, recent_notifications};
use put::read_all;

/// Routes:
/// - `GET /notifications`          → Full feed split into read/unread
/// - `GET /notifications/recent`   → Newest five with project titles
/// - `PUT /notifications/read-all` → Mark the whole feed read
pub fn notifications_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/recent", get(recent_notifications))
        .route("/read-all", put(read_all))
}
