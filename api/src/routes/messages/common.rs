use serde::Serialize;

use db::models::message::Model as MessageModel;
use db::models::user::Role;

/// Participant shape embedded in conversation payloads.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub image_url: Option<String>,
}

impl From<&db::models::user::Model> for ParticipantResponse {
    fn from(user: &db::models::user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            image_url: user.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub content: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub created_at: String,
    pub sender: Option<ParticipantResponse>,
    pub receiver: Option<ParticipantResponse>,
}

impl MessageResponse {
    pub fn from_model(
        message: &MessageModel,
        sender: Option<ParticipantResponse>,
        receiver: Option<ParticipantResponse>,
    ) -> Self {
        Self {
            id: message.id,
            content: message.content.clone(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            created_at: message.created_at.to_rfc3339(),
            sender,
            receiver,
        }
    }
}
