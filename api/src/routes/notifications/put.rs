use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use db::models::notification::Model as NotificationModel;

/// PUT /api/notifications/read-all
///
/// Marks every notification of the caller as read.
pub async fn read_all(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match NotificationModel::mark_all_read(db, user.id).await {
        Ok(()) => Json(ApiResponse::success((), "Notifications marked as read")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to mark notifications read");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    "Failed to update notifications",
                )),
            )
                .into_response()
        }
    }
}
