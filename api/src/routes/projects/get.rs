use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use crate::routes::projects::common::{
    ProjectDetailResponse, ProjectResponse, parse_report, to_responses,
};
use db::models::project::Model as ProjectModel;

/// Number of projects shown in the "recent" dashboard cards.
const RECENT_LIMIT: u64 = 5;

#[derive(Debug, Deserialize)]
pub struct ListOwnQuery {
    #[serde(default)]
    pub recent: bool,
}

/// GET /api/projects
///
/// Explore listing of every project with owner summaries.
pub async fn list_projects(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    let projects = match ProjectModel::find_all(db).await {
        Ok(projects) => projects,
        Err(e) => {
            tracing::error!(error = %e, "failed to list projects");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ProjectResponse>>::error(
                    "Failed to retrieve projects",
                )),
            )
                .into_response();
        }
    };

    match to_responses(db, &projects).await {
        Ok(data) => {
            Json(ApiResponse::success(data, "Projects retrieved successfully")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve project owners");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ProjectResponse>>::error(
                    "Failed to retrieve projects",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/projects/mine
///
/// The calling student's submissions, newest first. `?recent=true` limits
/// the listing to the newest five.
pub async fn my_projects(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<ListOwnQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let limit = query.recent.then_some(RECENT_LIMIT);
    match ProjectModel::for_student(db, user.id, limit).await {
        Ok(projects) => match to_responses(db, &projects).await {
            Ok(data) => {
                Json(ApiResponse::success(data, "Projects retrieved successfully")).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve project owners");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<ProjectResponse>>::error(
                        "Failed to retrieve projects",
                    )),
                )
                    .into_response()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to list student projects");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ProjectResponse>>::error(
                    "Failed to retrieve projects",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/projects/supervised
///
/// Projects supervised by the caller, each with its student summary.
/// `?recent=true` limits the listing to the newest five.
pub async fn supervised_projects(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<ListOwnQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let limit = query.recent.then_some(RECENT_LIMIT);
    match ProjectModel::for_supervisor(db, user.id, limit).await {
        Ok(projects) => match to_responses(db, &projects).await {
            Ok(data) => {
                Json(ApiResponse::success(data, "Projects retrieved successfully")).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve project owners");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<ProjectResponse>>::error(
                        "Failed to retrieve projects",
                    )),
                )
                    .into_response()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to list supervised projects");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ProjectResponse>>::error(
                    "Failed to retrieve projects",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/projects/{project_id}
///
/// Project detail; the stored plagiarism report is parsed into an array of
/// matched sources.
pub async fn get_project(
    State(app_state): State<AppState>,
    Path(project_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let project = match ProjectModel::find_by_id(db, project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Project not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch project");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve project")),
            )
                .into_response();
        }
    };

    let base = match to_responses(db, std::slice::from_ref(&project)).await {
        Ok(mut responses) => responses.remove(0),
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve project owners");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve project")),
            )
                .into_response();
        }
    };

    let detail = ProjectDetailResponse {
        project: base,
        plagiarism_report: parse_report(project.plagiarism_report.as_deref()),
    };

    Json(ApiResponse::success(detail, "Project retrieved successfully")).into_response()
}
