use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::str::FromStr;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::services::identity::IdentityClient;
use db::models::user::{Model as UserModel, Role};

/// POST /api/auth/authenticate
///
/// Identity bootstrap: resolves the verified session to a local user row.
///
/// - Existing row (matched on the provider user id) → `200` with the user.
/// - No row yet → the profile is fetched from the identity provider and a
///   local row is created (role from provider metadata, default `STUDENT`)
///   → `201`.
/// - The provider does not know the user → `404`.
///
/// Clients route users without a selected role to role selection after this
/// call.
pub async fn authenticate(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserModel::find_by_provider_id(db, &claims.sub).await {
        Ok(Some(user)) => {
            return (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserResponse::from(user),
                    "Authenticated",
                )),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "failed to look up user during bootstrap");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    }

    let profile = match IdentityClient::from_config().fetch_profile(&claims.sub).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Identity not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "identity provider lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    "Failed to resolve identity",
                )),
            )
                .into_response();
        }
    };

    let role = profile
        .metadata
        .role
        .as_deref()
        .and_then(|r| Role::from_str(r).ok())
        .unwrap_or(Role::Student);

    match UserModel::create(
        db,
        &profile.id,
        &profile.email,
        &profile.first_name,
        &profile.last_name,
        profile.image_url.as_deref(),
        role,
    )
    .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Account created",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to create user during bootstrap");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to create user")),
            )
                .into_response()
        }
    }
}
