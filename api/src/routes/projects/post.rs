use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, resolve_current_user};
use crate::routes::projects::common::to_responses;
use crate::services::plagiarism::PlagiarismClient;
use db::models::notification::Model as NotificationModel;
use db::models::project::{Model as ProjectModel, PLAGIARISM_ALERT_THRESHOLD};
use db::models::user::Model as UserModel;

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertProjectRequest {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "is required"))]
    pub description: String,

    #[serde(default)]
    pub file_url: String,

    pub supervisor_id: i64,
}

/// POST /api/projects
///
/// Submit a new project or update an existing one, then run the plagiarism
/// check. The check is best-effort and single-attempt: any failure is logged
/// and the score/report stay NULL. A score above the alert threshold
/// notifies the supervisor.
///
/// ### Responses
/// - `200 OK` with the stored project
/// - `400 Bad Request` - validation failure or missing file URL
/// - `403 Forbidden` - updating another student's project
/// - `404 Not Found` - unknown session user, project, or supervisor
pub async fn upsert_project(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpsertProjectRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if req.file_url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("No file URL provided")),
        )
            .into_response();
    }

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match UserModel::find_by_id(db, req.supervisor_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Supervisor not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to look up supervisor");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    }

    // Updates must stay within the submitting student's own projects.
    if let Some(id) = req.id {
        match ProjectModel::find_by_id(db, id).await {
            Ok(Some(existing)) if existing.student_id != user.id => {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::<()>::error("Forbidden")),
                )
                    .into_response();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "failed to look up project");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Database error")),
                )
                    .into_response();
            }
        }
    }

    let project = match ProjectModel::upsert(
        db,
        req.id,
        &req.title,
        &req.description,
        &req.file_url,
        user.id,
        req.supervisor_id,
    )
    .await
    {
        Ok(project) => project,
        Err(e) => {
            tracing::error!(error = %e, "failed to upsert project");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to upsert project")),
            )
                .into_response();
        }
    };

    let project = run_plagiarism_check(&app_state, project).await;

    let data = match to_responses(db, std::slice::from_ref(&project)).await {
        Ok(mut responses) => responses.remove(0),
        Err(e) => {
            tracing::error!(error = %e, "failed to build project response");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    Json(ApiResponse::success(data, "Project submitted successfully")).into_response()
}

/// Runs the single-attempt plagiarism check and persists its outcome. The
/// project row is always updated, with NULLs when the check failed.
async fn run_plagiarism_check(app_state: &AppState, project: ProjectModel) -> ProjectModel {
    let db = app_state.db();

    let (score, report) = match PlagiarismClient::from_config()
        .check_file_url(&project.file_url)
        .await
    {
        Ok(outcome) => (outcome.score, Some(outcome.report_json())),
        Err(e) => {
            tracing::warn!(
                error = %e,
                project_id = project.id,
                "plagiarism check failed"
            );
            (None, None)
        }
    };

    let updated = match ProjectModel::set_plagiarism(db, project.id, score, report).await {
        Ok(Some(updated)) => updated,
        Ok(None) => project,
        Err(e) => {
            tracing::error!(error = %e, "failed to persist plagiarism outcome");
            project
        }
    };

    if let Some(score) = updated.plagiarism_score {
        if score > PLAGIARISM_ALERT_THRESHOLD {
            let message = format!(
                "Plagiarism detected! {}% similarity in {}",
                score, updated.title
            );
            if let Err(e) =
                NotificationModel::create(db, updated.supervisor_id, &message, Some(updated.id))
                    .await
            {
                tracing::warn!(error = %e, "failed to create plagiarism alert");
            }
        }
    }

    updated
}
