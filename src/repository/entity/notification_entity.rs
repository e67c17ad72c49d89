use crate::dto::NotificationType;
use bson::{DateTime, Uuid};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct NotificationEntity {
    pub _id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related_id: Uuid,
    pub is_read: bool,
    pub created_at: DateTime,
}
