use serde::Serialize;

use db::models::notification::Model as NotificationModel;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub message: String,
    pub is_read: bool,
    pub project_id: Option<i64>,
    pub created_at: String,
}

impl From<&NotificationModel> for NotificationResponse {
    fn from(n: &NotificationModel) -> Self {
        Self {
            id: n.id,
            message: n.message.clone(),
            is_read: n.is_read,
            project_id: n.project_id,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// Feed split the way the notification panel consumes it.
#[derive(Debug, Default, Serialize)]
pub struct NotificationFeed {
    pub all: Vec<NotificationResponse>,
    pub read: Vec<NotificationResponse>,
    pub unread: Vec<NotificationResponse>,
}

#[derive(Debug, Serialize)]
pub struct RecentNotification {
    #[serde(flatten)]
    pub notification: NotificationResponse,
    pub project_title: Option<String>,
}
