use axum::{Json, extract::State, response::IntoResponse};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, resolve_current_user};

/// GET /api/auth/me
///
/// Returns the local user row for the current session.
pub async fn me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    let user = match resolve_current_user(app_state.db(), &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    Json(ApiResponse::success(
        UserResponse::from(user),
        "User retrieved successfully",
    ))
    .into_response()
}
