use crate::repository::entity::NotificationEntity;
use crate::dto::NotificationType;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related_id: Uuid,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
}

impl From<NotificationEntity> for Notification {
    fn from(value: NotificationEntity) -> Self {
        Self {
            id: value._id.into(),
            user_id: value.user_id.into(),
            notification_type: value.notification_type,
            title: value.title,
            message: value.message,
            related_id: value.related_id.into(),
            is_read: value.is_read,
            created_at: value.created_at.into(),
        }
    }
}
