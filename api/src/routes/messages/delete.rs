use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use db::models::message::Model as MessageModel;

/// DELETE /api/messages/{message_id}
///
/// Deletes a message. Only the sender may delete their own messages.
pub async fn delete_message(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    if !MessageModel::is_sender(message_id, user.id, db).await {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("Forbidden")),
        )
            .into_response();
    }

    match MessageModel::delete(db, message_id).await {
        Ok(()) => Json(ApiResponse::success((), "Message deleted successfully")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to delete message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to delete message")),
            )
                .into_response()
        }
    }
}
