use super::{
    dto::{NewNotification, Notification},
    error::Error,
};
use axum::async_trait;
use uuid::Uuid;

///
/// Durable per-user store of notifications.
/// Rows are created once and afterwards only is_read changes.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Appends new notification.
    /// Id and created_at are assigned by the repository.
    ///
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error>;

    ///
    /// Finds notification regardless of its owner
    ///
    async fn find(&self, id: Uuid) -> Result<Option<Notification>, Error>;

    ///
    /// Finds all notifications of the user.
    /// Notifications are sorted descending by creation date.
    ///
    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error>;

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Sets is_read of the notification to true
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn update_read(&self, id: Uuid, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Sets is_read of every notification of the user to true
    ///
    /// ### Returns
    /// Number of notifications that were unread
    ///
    async fn update_all_read(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Deletes notification
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), Error>;
}
