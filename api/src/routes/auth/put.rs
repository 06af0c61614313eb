use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, resolve_current_user};
use crate::services::identity::IdentityClient;
use db::models::user::{Model as UserModel, Role};

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// PUT /api/auth/role
///
/// Role selection. Updates the local row, then pushes the role into the
/// identity provider's user metadata. The metadata write is best-effort:
/// a provider outage must not block role selection.
pub async fn set_role(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SetRoleRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let updated = match UserModel::set_role(db, user.id, req.role).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to update role");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to update role")),
            )
                .into_response();
        }
    };

    if let Err(e) = IdentityClient::from_config()
        .update_role_metadata(&updated.provider_id, &req.role.to_string())
        .await
    {
        tracing::warn!(error = %e, "failed to update identity provider metadata");
    }

    Json(ApiResponse::success(
        UserResponse::from(updated),
        "Role updated successfully",
    ))
    .into_response()
}
