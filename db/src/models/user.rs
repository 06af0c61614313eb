use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
///
/// Identity lives with the external provider; `provider_id` is the stable
/// reference to the provider's user record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity provider user reference (unique).
    pub provider_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub image_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "STUDENT")]
    Student,

    #[sea_orm(string_value = "SUPERVISOR")]
    Supervisor,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new user from a provider profile. `full_name` is derived
    /// from the name parts, matching what the provider displays.
    pub async fn create(
        db: &DbConn,
        provider_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        image_url: Option<&str>,
        role: Role,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active = ActiveModel {
            provider_id: Set(provider_id.to_owned()),
            email: Set(email.to_owned()),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            full_name: Set(format!("{} {}", first_name, last_name).trim().to_owned()),
            image_url: Set(image_url.map(|u| u.to_owned())),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_provider_id(
        db: &DbConn,
        provider_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::ProviderId.eq(provider_id))
            .one(db)
            .await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::FullName).all(db).await
    }

    pub async fn find_supervisors(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Supervisor))
            .order_by_asc(Column::FullName)
            .all(db)
            .await
    }

    /// Updates the stored role. The caller is responsible for pushing the
    /// change into the identity provider's metadata.
    pub async fn set_role(db: &DbConn, id: i64, role: Role) -> Result<Option<Model>, DbErr> {
        let Some(user) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now());

        active.update(db).await.map(Some)
    }
}
