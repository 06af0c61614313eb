use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A student's submitted work item under review by a supervisor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: String,
    /// Public URL produced by the external upload service.
    pub file_url: String,

    pub student_id: i64,
    pub supervisor_id: i64,

    pub status: ProjectStatus,

    /// Similarity percentage from the external scoring API. NULL until the
    /// check completes; stays NULL when the check fails.
    pub plagiarism_score: Option<f32>,
    /// JSON array of matched sources, serialized as returned by the API.
    pub plagiarism_report: Option<String>,

    pub feedback: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProjectStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,

    #[sea_orm(string_value = "UNDER_REVIEW")]
    UnderReview,

    #[sea_orm(string_value = "APPROVED")]
    Approved,

    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Score above which a supervisor gets a plagiarism alert.
pub const PLAGIARISM_ALERT_THRESHOLD: f32 = 50.0;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SupervisorId",
        to = "super::user::Column::Id"
    )]
    Supervisor,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates or updates a project. A new project always starts `PENDING`;
    /// an update rewrites the submitted fields but never touches the status.
    pub async fn upsert(
        db: &DbConn,
        id: Option<i64>,
        title: &str,
        description: &str,
        file_url: &str,
        student_id: i64,
        supervisor_id: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let existing = match id {
            Some(id) => Entity::find_by_id(id).one(db).await?,
            None => None,
        };

        match existing {
            Some(project) => {
                let mut active: ActiveModel = project.into();
                active.title = Set(title.to_owned());
                active.description = Set(description.to_owned());
                active.file_url = Set(file_url.to_owned());
                active.supervisor_id = Set(supervisor_id);
                active.updated_at = Set(now);
                active.update(db).await
            }
            None => {
                let active = ActiveModel {
                    title: Set(title.to_owned()),
                    description: Set(description.to_owned()),
                    file_url: Set(file_url.to_owned()),
                    student_id: Set(student_id),
                    supervisor_id: Set(supervisor_id),
                    status: Set(ProjectStatus::Pending),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(db).await
            }
        }
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_desc(Column::CreatedAt).all(db).await
    }

    pub async fn for_student(
        db: &DbConn,
        student_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(db).await
    }

    pub async fn for_supervisor(
        db: &DbConn,
        supervisor_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find()
            .filter(Column::SupervisorId.eq(supervisor_id))
            .order_by_desc(Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(db).await
    }

    /// Sets the review status. Transitions are unconstrained; any status can
    /// follow any other. Missing feedback is stored as `"No feedback"`.
    pub async fn set_status(
        db: &DbConn,
        id: i64,
        status: ProjectStatus,
        feedback: Option<&str>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(project) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = project.into();
        active.status = Set(status);
        active.feedback = Set(Some(
            feedback.filter(|f| !f.trim().is_empty()).unwrap_or("No feedback").to_owned(),
        ));
        active.updated_at = Set(Utc::now());

        active.update(db).await.map(Some)
    }

    /// Persists the outcome of a plagiarism check. Both fields may be NULL
    /// when the check failed.
    pub async fn set_plagiarism(
        db: &DbConn,
        id: i64,
        score: Option<f32>,
        report: Option<String>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(project) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = project.into();
        active.plagiarism_score = Set(score);
        active.plagiarism_report = Set(report);
        active.updated_at = Set(Utc::now());

        active.update(db).await.map(Some)
    }

    // --- Dashboard aggregates (on-demand queries, no caching) ---

    pub async fn count_for_student(db: &DbConn, student_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .count(db)
            .await
    }

    pub async fn count_for_student_with_status(
        db: &DbConn,
        student_id: i64,
        status: ProjectStatus,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(status))
            .count(db)
            .await
    }

    pub async fn count_for_supervisor_with_status(
        db: &DbConn,
        supervisor_id: i64,
        status: ProjectStatus,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SupervisorId.eq(supervisor_id))
            .filter(Column::Status.eq(status))
            .count(db)
            .await
    }

    /// Counts supervised projects resolved (approved or rejected) since the
    /// given instant.
    pub async fn count_reviewed_since(
        db: &DbConn,
        supervisor_id: i64,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SupervisorId.eq(supervisor_id))
            .filter(
                Column::Status.is_in([ProjectStatus::Approved, ProjectStatus::Rejected]),
            )
            .filter(Column::UpdatedAt.gte(since))
            .count(db)
            .await
    }

    /// Counts supervised projects whose score crossed the alert threshold.
    pub async fn count_plagiarism_alerts(
        db: &DbConn,
        supervisor_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SupervisorId.eq(supervisor_id))
            .filter(Column::PlagiarismScore.gt(PLAGIARISM_ALERT_THRESHOLD))
            .count(db)
            .await
    }

    /// Average plagiarism score over supervised projects. NULL scores are
    /// ignored; no scored projects yields 0.
    pub async fn average_plagiarism_score(
        db: &DbConn,
        supervisor_id: i64,
    ) -> Result<f64, DbErr> {
        let avg: Option<Option<f64>> = Entity::find()
            .filter(Column::SupervisorId.eq(supervisor_id))
            .select_only()
            .column_as(Expr::expr(Func::avg(Expr::col(Column::PlagiarismScore))), "avg_score")
            .into_tuple()
            .one(db)
            .await?;

        Ok(avg.flatten().unwrap_or(0.0))
    }
}
