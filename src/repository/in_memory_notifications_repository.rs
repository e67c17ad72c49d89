use super::{
    dto::{NewNotification, Notification},
    Error, NotificationsRepository,
};
use axum::async_trait;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

///
/// Ledger kept in process memory.
/// Used by single node deployments without database and in tests.
///
#[derive(Default)]
pub struct InMemoryNotificationsRepository {
    store: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    next_sequence: u64,
    notifications: HashMap<Uuid, StoredNotification>,
}

struct StoredNotification {
    // Orders notifications created within the same timestamp
    sequence: u64,
    notification: Notification,
}

impl InMemoryNotificationsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            notification_type: notification.notification_type,
            title: notification.title,
            message: notification.message,
            related_id: notification.related_id,
            is_read: false,
            created_at: OffsetDateTime::now_utc(),
        };

        let mut store = self.store.write().await;
        let sequence = store.next_sequence;
        store.next_sequence += 1;
        store.notifications.insert(
            notification.id,
            StoredNotification {
                sequence,
                notification: notification.clone(),
            },
        );

        Ok(notification)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Notification>, Error> {
        let store = self.store.read().await;
        let notification = store
            .notifications
            .get(&id)
            .map(|stored| stored.notification.clone());

        Ok(notification)
    }

    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        let store = self.store.read().await;

        let mut stored = store
            .notifications
            .values()
            .filter(|stored| stored.notification.user_id == user_id)
            .collect::<Vec<_>>();
        stored.sort_by(|a, b| {
            (b.notification.created_at, b.sequence).cmp(&(a.notification.created_at, a.sequence))
        });

        let notifications = stored
            .into_iter()
            .map(|stored| stored.notification.clone())
            .collect();

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error> {
        let store = self.store.read().await;
        let count = store
            .notifications
            .values()
            .filter(|stored| stored.notification.user_id == user_id)
            .filter(|stored| !stored.notification.is_read)
            .count();

        Ok(count as u64)
    }

    async fn update_read(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        let mut store = self.store.write().await;

        match store.notifications.get_mut(&id) {
            Some(stored) if stored.notification.user_id == user_id => {
                stored.notification.is_read = true;
                Ok(())
            }
            _ => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let mut store = self.store.write().await;

        let mut updated = 0;
        for stored in store.notifications.values_mut() {
            if stored.notification.user_id == user_id && !stored.notification.is_read {
                stored.notification.is_read = true;
                updated += 1;
            }
        }

        Ok(updated)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        let mut store = self.store.write().await;

        let owned = store
            .notifications
            .get(&id)
            .is_some_and(|stored| stored.notification.user_id == user_id);
        if !owned {
            return Err(Error::NoDocumentUpdated);
        }
        store.notifications.remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dto::NotificationType;
    use std::sync::Arc;

    fn new_notification(user_id: Uuid, title: &str) -> NewNotification {
        NewNotification {
            user_id,
            notification_type: NotificationType::CommentAdded,
            title: title.to_string(),
            message: "Ann commented on: Ship release".to_string(),
            related_id: Uuid::from_u128(100),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_unread() {
        let repository = InMemoryNotificationsRepository::new();

        let first = repository
            .insert(new_notification(Uuid::from_u128(1), "first"))
            .await
            .unwrap();
        let second = repository
            .insert(new_notification(Uuid::from_u128(1), "second"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert!(!first.is_read);
        assert_eq!(first.related_id, Uuid::from_u128(100));
    }

    #[tokio::test]
    async fn find_many_newest_first_only_own() {
        let repository = InMemoryNotificationsRepository::new();
        let user_id = Uuid::from_u128(1);

        let first = repository
            .insert(new_notification(user_id, "first"))
            .await
            .unwrap();
        repository
            .insert(new_notification(Uuid::from_u128(2), "other"))
            .await
            .unwrap();
        let second = repository
            .insert(new_notification(user_id, "second"))
            .await
            .unwrap();

        let notifications = repository.find_many(user_id).await.unwrap();

        let ids = notifications.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn update_read_not_owner() {
        let repository = InMemoryNotificationsRepository::new();
        let notification = repository
            .insert(new_notification(Uuid::from_u128(1), "title"))
            .await
            .unwrap();

        let result = repository
            .update_read(notification.id, Uuid::from_u128(2))
            .await;

        assert!(matches!(result, Err(Error::NoDocumentUpdated)));
        assert_eq!(repository.count_unread(Uuid::from_u128(1)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_read_twice_ok() {
        let repository = InMemoryNotificationsRepository::new();
        let user_id = Uuid::from_u128(1);
        let notification = repository
            .insert(new_notification(user_id, "title"))
            .await
            .unwrap();

        repository.update_read(notification.id, user_id).await.unwrap();
        let result = repository.update_read(notification.id, user_id).await;

        assert!(result.is_ok());
        assert_eq!(repository.count_unread(user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_all_read_only_own() {
        let repository = InMemoryNotificationsRepository::new();
        let user_id = Uuid::from_u128(1);
        let other_user_id = Uuid::from_u128(2);
        for title in ["a", "b", "c"] {
            repository
                .insert(new_notification(user_id, title))
                .await
                .unwrap();
        }
        repository
            .insert(new_notification(other_user_id, "d"))
            .await
            .unwrap();

        let updated = repository.update_all_read(user_id).await.unwrap();

        assert_eq!(updated, 3);
        assert_eq!(repository.count_unread(user_id).await.unwrap(), 0);
        assert_eq!(repository.count_unread(other_user_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_not_owner_keeps_row() {
        let repository = InMemoryNotificationsRepository::new();
        let notification = repository
            .insert(new_notification(Uuid::from_u128(1), "title"))
            .await
            .unwrap();

        let result = repository
            .delete(notification.id, Uuid::from_u128(2))
            .await;

        assert!(matches!(result, Err(Error::NoDocumentUpdated)));
        assert!(repository.find(notification.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_inserts() {
        let repository = Arc::new(InMemoryNotificationsRepository::new());
        let user_id = Uuid::from_u128(1);

        let handles = (0..50)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .insert(new_notification(user_id, &i.to_string()))
                        .await
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repository.find_many(user_id).await.unwrap().len(), 50);
        assert_eq!(repository.count_unread(user_id).await.unwrap(), 50);
    }
}
