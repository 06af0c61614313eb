use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use db::models::message::Model as MessageModel;
use db::models::user::Model as UserModel;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: i64,
    pub content: String,
}

/// POST /api/messages
///
/// Sends a direct message from the session user to the receiver.
pub async fn send_message(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let content = req.content.trim();
    if content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Content is required")),
        )
            .into_response();
    }

    let sender = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match UserModel::find_by_id(db, req.receiver_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Receiver not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to look up receiver");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    }

    match MessageModel::create(db, sender.id, req.receiver_id, content).await {
        Ok(message) => {
            Json(ApiResponse::success(message, "Message sent successfully")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to send message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to send message")),
            )
                .into_response()
        }
    }
}
