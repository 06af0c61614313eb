use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::routes::common::{UserSummary, load_user_summaries};
use db::models::project::{Model as ProjectModel, ProjectStatus};

/// Project shape used in listings and transition responses.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub status: ProjectStatus,
    pub plagiarism_score: Option<f32>,
    pub feedback: Option<String>,
    pub student: Option<UserSummary>,
    pub supervisor: Option<UserSummary>,
    pub created_at: String,
    pub updated_at: String,
}

/// Detail shape; the stored report JSON string is parsed into an array.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub plagiarism_report: Vec<serde_json::Value>,
}

impl ProjectResponse {
    pub fn from_model(
        project: &ProjectModel,
        student: Option<UserSummary>,
        supervisor: Option<UserSummary>,
    ) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            file_url: project.file_url.clone(),
            status: project.status,
            plagiarism_score: project.plagiarism_score,
            feedback: project.feedback.clone(),
            student,
            supervisor,
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.to_rfc3339(),
        }
    }
}

/// Parses the stored report column the way the original client did:
/// `JSON.parse(report || "[]")`, with malformed data degrading to empty.
pub fn parse_report(report: Option<&str>) -> Vec<serde_json::Value> {
    report
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}

/// Builds listing responses for a batch of projects, resolving the owning
/// users in a single query.
pub async fn to_responses(
    db: &DatabaseConnection,
    projects: &[ProjectModel],
) -> Result<Vec<ProjectResponse>, sea_orm::DbErr> {
    let ids = projects
        .iter()
        .flat_map(|p| [p.student_id, p.supervisor_id]);
    let summaries = load_user_summaries(db, ids).await?;

    Ok(projects
        .iter()
        .map(|p| {
            ProjectResponse::from_model(
                p,
                summaries.get(&p.student_id).cloned(),
                summaries.get(&p.supervisor_id).cloned(),
            )
        })
        .collect())
}
