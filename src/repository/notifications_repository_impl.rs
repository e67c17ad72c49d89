use super::{
    dto::{NewNotification, Notification},
    entity::NotificationEntity,
    Error, NotificationsRepository,
};
use axum::async_trait;
use bson::{doc, DateTime, Document};
use futures::TryStreamExt;
use mongodb::{options::IndexOptions, Collection, Database, IndexModel};
use uuid::Uuid;

const NOTIFICATIONS: &str = "notifications";
const INDEX_NAME_USER_ID_CREATED_AT: &str = "index_user_id_created_at";

///
/// MongoDB ledger.
/// Every notification is stored as a separate document.
///
pub struct NotificationsRepositoryImpl {
    database: Database,
}

impl NotificationsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection_names = database.list_collection_names().await?;
        if !collection_names.iter().any(|name| name == NOTIFICATIONS) {
            database.create_collection(NOTIFICATIONS).await?;
        }

        let collection = database.collection(NOTIFICATIONS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_USER_ID_CREATED_AT.to_string()) {
            Self::create_user_id_created_at_index(&collection).await?;
            tracing::debug!("created index {NOTIFICATIONS}.{INDEX_NAME_USER_ID_CREATED_AT}");
        }

        Ok(Self { database })
    }

    async fn create_user_id_created_at_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "user_id": 1,
                "created_at": -1,
            })
            .options(
                IndexOptions::builder()
                    .name(INDEX_NAME_USER_ID_CREATED_AT.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }

    fn collection(&self) -> Collection<NotificationEntity> {
        self.database.collection(NOTIFICATIONS)
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error> {
        let entity = NotificationEntity {
            _id: Uuid::new_v4().into(),
            user_id: notification.user_id.into(),
            notification_type: notification.notification_type,
            title: notification.title,
            message: notification.message,
            related_id: notification.related_id.into(),
            is_read: false,
            created_at: DateTime::now(),
        };

        self.collection().insert_one(&entity).await?;

        Ok(Notification::from(entity))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Notification>, Error> {
        let id = bson::Uuid::from(id);

        let notification = self
            .collection()
            .find_one(doc! { "_id": id })
            .await?
            .map(Notification::from);

        Ok(notification)
    }

    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        let user_id = bson::Uuid::from(user_id);

        let notifications = self
            .collection()
            .find(doc! { "user_id": user_id })
            .sort(doc! {
                "created_at": -1,
                "_id": -1,
            })
            .await?
            .map_ok(Notification::from)
            .try_collect()
            .await?;

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let count = self
            .collection()
            .count_documents(doc! {
                "user_id": user_id,
                "is_read": false,
            })
            .await?;

        Ok(count)
    }

    async fn update_read(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        let id = bson::Uuid::from(id);
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .collection()
            .update_one(
                doc! {
                    "_id": id,
                    "user_id": user_id,
                },
                doc! {
                    "$set": {
                        "is_read": true,
                    }
                },
            )
            .await?;

        // matched_count instead of modified_count because marking
        // already read notification doesn't count as modification
        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .collection()
            .update_many(
                doc! {
                    "user_id": user_id,
                    "is_read": false,
                },
                doc! {
                    "$set": {
                        "is_read": true,
                    }
                },
            )
            .await?;

        Ok(update_result.modified_count)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), Error> {
        let id = bson::Uuid::from(id);
        let user_id = bson::Uuid::from(user_id);

        let delete_result = self
            .collection()
            .delete_one(doc! {
                "_id": id,
                "user_id": user_id,
            })
            .await?;

        match delete_result.deleted_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
