use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use db::models::project::{Model as ProjectModel, ProjectStatus};

#[derive(Debug, Default, Serialize)]
pub struct StudentDashboard {
    pub submissions: u64,
    pub approval_rate: f64,
    pub under_review: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct SupervisorDashboard {
    pub pending_reviews: u64,
    pub reviewed_this_week: u64,
    pub plagiarism_alerts: u64,
    pub average_plagiarism_score: f64,
}

/// Start of the current week, Sunday 00:00 UTC.
fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = now.weekday().num_days_from_sunday() as i64;
    (now - Duration::days(days_since_sunday))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// GET /api/dashboard/student
pub async fn student_dashboard(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let stats = async {
        let submissions = ProjectModel::count_for_student(db, user.id).await?;
        let approved =
            ProjectModel::count_for_student_with_status(db, user.id, ProjectStatus::Approved)
                .await?;
        let under_review =
            ProjectModel::count_for_student_with_status(db, user.id, ProjectStatus::UnderReview)
                .await?;

        let approval_rate = if submissions > 0 {
            (approved as f64 / submissions as f64) * 100.0
        } else {
            0.0
        };

        Ok::<StudentDashboard, sea_orm::DbErr>(StudentDashboard {
            submissions,
            approval_rate,
            under_review,
        })
    }
    .await;

    match stats {
        Ok(stats) => Json(ApiResponse::success(
            stats,
            "Dashboard retrieved successfully",
        ))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to compute student dashboard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StudentDashboard>::error(
                    "Failed to retrieve dashboard",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/dashboard/supervisor
pub async fn supervisor_dashboard(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let week_start = start_of_week(Utc::now());

    let stats = async {
        let pending_reviews =
            ProjectModel::count_for_supervisor_with_status(db, user.id, ProjectStatus::Pending)
                .await?;
        let reviewed_this_week =
            ProjectModel::count_reviewed_since(db, user.id, week_start).await?;
        let plagiarism_alerts = ProjectModel::count_plagiarism_alerts(db, user.id).await?;
        let average_plagiarism_score =
            ProjectModel::average_plagiarism_score(db, user.id).await?;

        Ok::<SupervisorDashboard, sea_orm::DbErr>(SupervisorDashboard {
            pending_reviews,
            reviewed_this_week,
            plagiarism_alerts,
            average_plagiarism_score,
        })
    }
    .await;

    match stats {
        Ok(stats) => Json(ApiResponse::success(
            stats,
            "Dashboard retrieved successfully",
        ))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to compute supervisor dashboard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SupervisorDashboard>::error(
                    "Failed to retrieve dashboard",
                )),
            )
                .into_response()
        }
    }
}
