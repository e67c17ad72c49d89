use crate::{dto::output, error::Error};
use axum::async_trait;
use uuid::Uuid;

///
/// Notifications of the authenticated user.
/// Users can access only their own notifications.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    ///
    /// Find all notifications that belong to the user
    ///
    /// ### Returns
    /// Vec of notifications sorted from the newest
    ///
    async fn find_notifications(&self, user_id: Uuid)
        -> Result<Vec<output::Notification>, Error>;

    async fn count_unread(&self, user_id: Uuid) -> Result<output::UnreadCount, Error>;

    ///
    /// Mark notification as read
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when notification with id does not exist
    /// - [Error::Forbidden] when notification belongs to another user
    ///
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Mark every notification of the user as read
    ///
    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Delete notification
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when notification with id does not exist
    /// - [Error::Forbidden] when notification belongs to another user
    ///
    async fn delete_notification(&self, id: Uuid, user_id: Uuid) -> Result<(), Error>;
}
