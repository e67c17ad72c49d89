use super::NotificationsService;
use crate::{
    dto::output,
    error::Error,
    repository::{self, NotificationsRepository},
};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct NotificationsServiceImpl {
    repository: Arc<dyn NotificationsRepository>,
}

impl NotificationsServiceImpl {
    pub fn new(repository: Arc<dyn NotificationsRepository>) -> Self {
        Self { repository }
    }

    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when notification with id does not exist
    /// - [Error::Forbidden] when notification belongs to another user
    ///
    async fn ensure_owner(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        let notification = self
            .repository
            .find(id)
            .await?
            .ok_or(Error::NotificationNotExist)?;

        match notification.user_id == user_id {
            true => Ok(()),
            false => Err(Error::Forbidden),
        }
    }
}

#[async_trait]
impl NotificationsService for NotificationsServiceImpl {
    async fn find_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<output::Notification>, Error> {
        tracing::info!("finding notifications");

        let notifications = self.repository.find_many(user_id).await?;
        tracing::info!(count = notifications.len(), "found notifications");

        let notifications = notifications
            .into_iter()
            .map(output::Notification::from)
            .collect();

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<output::UnreadCount, Error> {
        tracing::info!("counting unread notifications");

        let count = self.repository.count_unread(user_id).await?;
        tracing::info!(count, "counted unread notifications");

        Ok(output::UnreadCount { count })
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        tracing::info!(%id, "marking notification as read");

        self.ensure_owner(id, user_id).await?;
        self.repository
            .update_read(id, user_id)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::NotificationNotExist,
                err => Error::Database(err),
            })?;

        tracing::info!(%id, "marked notification as read");

        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("marking all notifications as read");

        let count = self.repository.update_all_read(user_id).await?;

        tracing::info!(count, "marked all notifications as read");

        Ok(())
    }

    async fn delete_notification(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        tracing::info!(%id, "deleting notification");

        self.ensure_owner(id, user_id).await?;
        self.repository
            .delete(id, user_id)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::NotificationNotExist,
                err => Error::Database(err),
            })?;

        tracing::info!(%id, "deleted notification");

        Ok(())
    }
}
