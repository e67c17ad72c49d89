use super::NotificationsApi;
use crate::{dto::output, error::Error, service::notifications_service::NotificationsService};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

///
/// Api calling notifications service in the same process
///
pub struct LocalNotificationsApi {
    user_id: Uuid,
    notifications_service: Arc<dyn NotificationsService>,
}

impl LocalNotificationsApi {
    pub fn new(user_id: Uuid, notifications_service: Arc<dyn NotificationsService>) -> Self {
        Self {
            user_id,
            notifications_service,
        }
    }
}

#[async_trait]
impl NotificationsApi for LocalNotificationsApi {
    async fn fetch_notifications(&self) -> Result<Vec<output::Notification>, Error> {
        self.notifications_service
            .find_notifications(self.user_id)
            .await
    }

    async fn fetch_unread_count(&self) -> Result<u64, Error> {
        let unread = self.notifications_service.count_unread(self.user_id).await?;

        Ok(unread.count)
    }

    async fn mark_as_read(&self, id: Uuid) -> Result<(), Error> {
        self.notifications_service.mark_read(id, self.user_id).await
    }

    async fn mark_all_as_read(&self) -> Result<(), Error> {
        self.notifications_service.mark_all_read(self.user_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.notifications_service
            .delete_notification(id, self.user_id)
            .await
    }
}
