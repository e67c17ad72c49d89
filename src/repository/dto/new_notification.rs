use crate::dto::NotificationType;
use uuid::Uuid;

///
/// Notification before it is appended to the ledger.
/// Ledger assigns id and created_at.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related_id: Uuid,
}
