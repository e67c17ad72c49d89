use crate::{dto::output, error::Error};
use axum::async_trait;
use uuid::Uuid;

///
/// Notifications api of one authenticated user
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<output::Notification>, Error>;

    async fn fetch_unread_count(&self) -> Result<u64, Error>;

    async fn mark_as_read(&self, id: Uuid) -> Result<(), Error>;

    async fn mark_all_as_read(&self) -> Result<(), Error>;

    async fn delete(&self, id: Uuid) -> Result<(), Error>;
}
