use axum::{Json, http::StatusCode};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::ValidationErrors;

use crate::auth::Claims;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::user::{Entity as UserEntity, Model as UserModel, Role};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// Full user record as exposed by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub provider_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub image_url: Option<String>,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            provider_id: user.provider_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            full_name: user.full_name,
            image_url: user.image_url,
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Compact user shape embedded in project and message payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub full_name: String,
    pub image_url: Option<String>,
}

impl From<&UserModel> for UserSummary {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            image_url: user.image_url.clone(),
        }
    }
}

/// Loads the summaries for a set of user ids in one query.
pub async fn load_user_summaries(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, UserSummary>, sea_orm::DbErr> {
    let ids: Vec<i64> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = UserEntity::find()
        .filter(db::models::user::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(users
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect())
}

/// Resolves the local user row behind a verified session.
///
/// Mirrors the original bootstrap contract: an unknown identity is a `404`,
/// a storage failure a `500`.
pub async fn resolve_current_user(
    db: &DatabaseConnection,
    claims: &Claims,
) -> Result<UserModel, (StatusCode, Json<ApiResponse<Empty>>)> {
    match UserModel::find_by_provider_id(db, &claims.sub).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        )),
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve current user");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            ))
        }
    }
}

/// Flattens `validator` errors into a single human-readable message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid value for {field}"));
            parts.push(format!("{field}: {message}"));
        }
    }
    parts.sort();
    parts.join("; ")
}
