use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use db::models::user::{Model as UserModel, Role};

/// Directory entry for user pickers (message recipients, supervisor choice).
#[derive(Debug, Serialize)]
pub struct DirectoryUser {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub image_url: Option<String>,
}

impl From<UserModel> for DirectoryUser {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            image_url: user.image_url,
        }
    }
}

/// GET /api/users
///
/// All users as compact directory entries.
pub async fn list_users(State(app_state): State<AppState>) -> impl IntoResponse {
    match UserModel::find_all(app_state.db()).await {
        Ok(users) => {
            let users: Vec<DirectoryUser> = users.into_iter().map(DirectoryUser::from).collect();
            Json(ApiResponse::success(users, "Users retrieved successfully")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<DirectoryUser>>::error(
                    "Failed to retrieve users",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/users/supervisors
///
/// All users with the supervisor role; backs the supervisor picker on the
/// submission form.
pub async fn list_supervisors(State(app_state): State<AppState>) -> impl IntoResponse {
    match UserModel::find_supervisors(app_state.db()).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            Json(ApiResponse::success(
                users,
                "Supervisors retrieved successfully",
            ))
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list supervisors");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<UserResponse>>::error(
                    "Failed to retrieve supervisors",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match UserModel::find_by_id(app_state.db(), user_id).await {
        Ok(Some(user)) => Json(ApiResponse::success(
            UserResponse::from(user),
            "User retrieved successfully",
        ))
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("User not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve user")),
            )
                .into_response()
        }
    }
}
