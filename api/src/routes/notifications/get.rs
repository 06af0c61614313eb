use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::collections::HashMap;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use crate::routes::notifications::common::{
    NotificationFeed, NotificationResponse, RecentNotification,
};
use db::models::notification::Model as NotificationModel;
use db::models::project::{Column as ProjectColumn, Entity as ProjectEntity};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// Number of notifications shown in the dropdown panel.
const RECENT_LIMIT: u64 = 5;

/// GET /api/notifications
///
/// The caller's full feed, newest first, split into read and unread for the
/// panel tabs.
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match NotificationModel::find_for_user(db, user.id).await {
        Ok(notifications) => {
            let all: Vec<NotificationResponse> =
                notifications.iter().map(NotificationResponse::from).collect();
            let (read, unread): (Vec<_>, Vec<_>) =
                all.iter().cloned().partition(|n| n.is_read);

            Json(ApiResponse::success(
                NotificationFeed { all, read, unread },
                "Notifications retrieved successfully",
            ))
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list notifications");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<NotificationFeed>::error(
                    "Failed to retrieve notifications",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/notifications/recent
///
/// The newest five notifications, each carrying the linked project's title
/// when one exists.
pub async fn recent_notifications(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let notifications = match NotificationModel::recent_for_user(db, user.id, RECENT_LIMIT).await {
        Ok(notifications) => notifications,
        Err(e) => {
            tracing::error!(error = %e, "failed to list recent notifications");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<RecentNotification>>::error(
                    "Failed to retrieve notifications",
                )),
            )
                .into_response();
        }
    };

    let project_ids: Vec<i64> = notifications.iter().filter_map(|n| n.project_id).collect();
    let titles: HashMap<i64, String> = if project_ids.is_empty() {
        HashMap::new()
    } else {
        match ProjectEntity::find()
            .filter(ProjectColumn::Id.is_in(project_ids))
            .all(db)
            .await
        {
            Ok(projects) => projects.into_iter().map(|p| (p.id, p.title)).collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve notification projects");
                HashMap::new()
            }
        }
    };

    let data: Vec<RecentNotification> = notifications
        .iter()
        .map(|n| RecentNotification {
            notification: NotificationResponse::from(n),
            project_title: n.project_id.and_then(|id| titles.get(&id).cloned()),
        })
        .collect();

    Json(ApiResponse::success(
        data,
        "Notifications retrieved successfully",
    ))
    .into_response()
}
