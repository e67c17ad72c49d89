use super::{DispatcherService, NotificationContent};
use crate::{
    dto::{
        input::{Actor, TaskEvent},
        output,
    },
    repository::{NewNotification, NotificationsRepository},
    service::{
        delivery_channel::{DeliveryChannel, PushEvent, PushMessage, Topic},
        recipients_resolver::resolve_recipients,
    },
};
use axum::async_trait;
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

pub struct DispatcherServiceImpl {
    repository: Arc<dyn NotificationsRepository>,
    delivery_channel: Arc<dyn DeliveryChannel>,
}

impl DispatcherServiceImpl {
    pub fn new(
        repository: Arc<dyn NotificationsRepository>,
        delivery_channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        Self {
            repository,
            delivery_channel,
        }
    }

    async fn dispatch_event(&self, actor: &Actor, event: &TaskEvent) {
        if let Err(err) = event.validate() {
            tracing::warn!(%err, event = event.as_ref(), "dropping event");
            return;
        }

        let recipients = resolve_recipients(event, actor.id);
        let content = NotificationContent::new(event, actor);
        tracing::info!(
            event = event.as_ref(),
            task_id = %event.task_id(),
            recipients = recipients.len(),
            "dispatching event"
        );

        // Recipients are independent of each other
        let notified = join_all(
            recipients
                .iter()
                .map(|recipient| self.notify_recipient(*recipient, &content)),
        )
        .await;

        let delivered = notified.into_iter().filter(|delivered| *delivered).count();
        tracing::info!(
            event = event.as_ref(),
            recipients = recipients.len(),
            delivered,
            "dispatched event"
        );

        if let TaskEvent::CommentAdded {
            task_id,
            comment_id,
            author,
            comment,
            ..
        } = event
        {
            let comment = comment.clone().unwrap_or_else(|| {
                json!({
                    "id": comment_id,
                    "task_id": task_id,
                    "user_id": author,
                })
            });
            self.broadcast(Topic::Task(*task_id), PushEvent::NewComment, &comment)
                .await;
        }
    }

    ///
    /// Appends notification for the recipient, then pushes it.
    /// Push is skipped when append fails.
    ///
    /// ### Returns
    /// true when notification was both stored and published
    ///
    async fn notify_recipient(&self, recipient: Uuid, content: &NotificationContent) -> bool {
        let new_notification = NewNotification {
            user_id: recipient,
            notification_type: content.notification_type,
            title: content.title.to_string(),
            message: content.message.clone(),
            related_id: content.related_id,
        };

        let notification = match self.repository.insert(new_notification).await {
            Ok(notification) => output::Notification::from(notification),
            Err(err) => {
                tracing::warn!(%err, %recipient, "failed to append notification");
                return false;
            }
        };
        tracing::debug!(id = %notification.id, %recipient, "appended notification");

        let publish_result = match PushMessage::new(PushEvent::Notification, &notification) {
            Ok(message) => {
                self.delivery_channel
                    .publish(Topic::User(recipient), message)
                    .await
            }
            Err(err) => Err(err),
        };

        match publish_result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, id = %notification.id, %recipient, "failed to publish notification");
                false
            }
        }
    }

    async fn broadcast(&self, topic: Topic, event: PushEvent, payload: &Value) {
        let publish_result = match PushMessage::new(event, payload) {
            Ok(message) => self.delivery_channel.publish(topic, message).await,
            Err(err) => Err(err),
        };

        match publish_result {
            Ok(()) => tracing::debug!(%topic, event = event.as_ref(), "broadcast"),
            Err(err) => {
                tracing::warn!(%err, %topic, event = event.as_ref(), "failed to broadcast")
            }
        }
    }
}

#[async_trait]
impl DispatcherService for DispatcherServiceImpl {
    async fn dispatch(&self, actor: &Actor, event: TaskEvent) {
        self.dispatch_event(actor, &event).await;
    }

    async fn dispatch_task_update(
        &self,
        actor: &Actor,
        task_id: Uuid,
        events: Vec<TaskEvent>,
        task: Value,
    ) {
        for event in events.iter() {
            self.dispatch_event(actor, event).await;
        }

        self.broadcast(Topic::Task(task_id), PushEvent::TaskUpdate, &task)
            .await;
    }
}
