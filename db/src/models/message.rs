use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};

/// A direct message between two users. Clients poll conversations on an
/// interval; there is no push channel.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub sender_id: i64,
    pub receiver_id: i64,

    pub content: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SenderId",
        to = "super::user::Column::Id"
    )]
    Sender,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceiverId",
        to = "super::user::Column::Id"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            content: Set(content.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    /// Both directions of the conversation between two users, oldest first.
    pub async fn conversation(
        db: &DbConn,
        user_a: i64,
        user_b: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(Column::SenderId.eq(user_a))
                            .add(Column::ReceiverId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(Column::SenderId.eq(user_b))
                            .add(Column::ReceiverId.eq(user_a)),
                    ),
            )
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn delete(db: &DbConn, message_id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(message_id).exec(db).await?;
        Ok(())
    }

    pub async fn is_sender(message_id: i64, user_id: i64, db: &DbConn) -> bool {
        let message = Entity::find_by_id(message_id).one(db).await;
        match message {
            Ok(Some(m)) => m.sender_id == user_id,
            _ => false,
        }
    }
}
