use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::projects::common::to_responses;
use db::models::notification::Model as NotificationModel;
use db::models::project::{Model as ProjectModel, ProjectStatus};
use db::models::user::Model as UserModel;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: Option<String>,
}

/// PUT /api/projects/{project_id}/approve
pub async fn approve_project(
    State(app_state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<FeedbackRequest>,
) -> impl IntoResponse {
    transition(app_state, project_id, ProjectStatus::Approved, req.feedback).await
}

/// PUT /api/projects/{project_id}/reject
pub async fn reject_project(
    State(app_state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<FeedbackRequest>,
) -> impl IntoResponse {
    transition(app_state, project_id, ProjectStatus::Rejected, req.feedback).await
}

/// PUT /api/projects/{project_id}/review
pub async fn review_project(
    State(app_state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<FeedbackRequest>,
) -> impl IntoResponse {
    transition(app_state, project_id, ProjectStatus::UnderReview, req.feedback).await
}

/// Applies a review transition and notifies both parties.
///
/// Transitions are unconstrained: any status may follow any other. Each
/// transition stores the supervisor's feedback (default `"No feedback"`) and
/// fires one notification to the supervisor and one to the student.
async fn transition(
    app_state: AppState,
    project_id: i64,
    status: ProjectStatus,
    feedback: Option<String>,
) -> axum::response::Response {
    let db = app_state.db();

    let updated = match ProjectModel::set_status(db, project_id, status, feedback.as_deref()).await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Project not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to update project status");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to update project")),
            )
                .into_response();
        }
    };

    let student_name = match UserModel::find_by_id(db, updated.student_id).await {
        Ok(Some(student)) => student.full_name,
        _ => "the student".to_string(),
    };

    let (supervisor_text, student_text) = transition_messages(status, &student_name, &updated.title);

    if let Err(e) =
        NotificationModel::notify(db, updated.supervisor_id, &supervisor_text, Some(updated.id))
            .await
    {
        tracing::warn!(error = %e, "failed to notify supervisor");
    }
    if let Err(e) =
        NotificationModel::notify(db, updated.student_id, &student_text, Some(updated.id)).await
    {
        tracing::warn!(error = %e, "failed to notify student");
    }

    match to_responses(db, std::slice::from_ref(&updated)).await {
        Ok(mut responses) => Json(ApiResponse::success(
            responses.remove(0),
            "Project updated successfully",
        ))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to build project response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response()
        }
    }
}

fn transition_messages(
    status: ProjectStatus,
    student_name: &str,
    title: &str,
) -> (String, String) {
    match status {
        ProjectStatus::Approved => (
            format!("You approved {student_name}'s project"),
            format!("Congratulation 🎉 Your project({title}) was approved"),
        ),
        ProjectStatus::Rejected => (
            format!("You rejected {student_name}'s project"),
            format!("❌ Your project({title}) was rejected"),
        ),
        ProjectStatus::UnderReview => (
            format!("You marked {student_name}'s project as \"Under Review\""),
            format!("🔍 Your project ({title}) is under review"),
        ),
        ProjectStatus::Pending => (
            format!("You reopened {student_name}'s project"),
            format!("Your project ({title}) is pending review again"),
        ),
    }
}
