use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// Append-only per-user notification log.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i64,
    pub project_id: Option<i64>,

    pub message: String,
    pub is_read: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stores a notification verbatim (used by the plagiarism alert).
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        message: &str,
        project_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            user_id: Set(user_id),
            project_id: Set(project_id),
            message: Set(message.to_owned()),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    /// Stores a notification prefixed with the recipient's full name:
    /// `"{full name} | {description}"`. Silently drops the notification when
    /// the recipient does not exist.
    pub async fn notify(
        db: &DbConn,
        user_id: i64,
        description: &str,
        project_id: Option<i64>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(user) = super::user::Model::find_by_id(db, user_id).await? else {
            tracing::warn!(user_id, "notification recipient not found");
            return Ok(None);
        };

        let message = format!("{} | {}", user.full_name, description);
        Self::create(db, user_id, &message, project_id).await.map(Some)
    }

    /// All notifications for a user, newest first.
    pub async fn find_for_user(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn recent_for_user(
        db: &DbConn,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await
    }

    pub async fn mark_all_read(db: &DbConn, user_id: i64) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
