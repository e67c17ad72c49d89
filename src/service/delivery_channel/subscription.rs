use super::{in_process_delivery_channel, PushMessage, Topic};
use std::sync::{Arc, Weak};
use tokio::sync::broadcast::{self, error::RecvError};

///
/// Receiving side of a topic.
/// Dropping it unsubscribes from the topic.
///
pub struct Subscription {
    topic: Topic,
    /// Taken on drop, before the registry is pruned
    messages_rx: Option<broadcast::Receiver<Arc<PushMessage>>>,
    registry: Weak<in_process_delivery_channel::TopicRegistry>,
}

impl Subscription {
    pub fn new(topic: Topic, messages_rx: broadcast::Receiver<Arc<PushMessage>>) -> Self {
        Self {
            topic,
            messages_rx: Some(messages_rx),
            registry: Weak::new(),
        }
    }

    ///
    /// Subscription which removes its topic from the registry
    /// when it was the last one
    ///
    pub(super) fn registered(
        topic: Topic,
        messages_rx: broadcast::Receiver<Arc<PushMessage>>,
        registry: &Arc<in_process_delivery_channel::TopicRegistry>,
    ) -> Self {
        Self {
            topic,
            messages_rx: Some(messages_rx),
            registry: Arc::downgrade(registry),
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    ///
    /// Waits for next message in the order it was published.
    /// Messages skipped because subscriber lagged are logged and lost.
    ///
    /// ### Returns
    /// None when topic was closed
    ///
    pub async fn recv(&mut self) -> Option<Arc<PushMessage>> {
        let messages_rx = self.messages_rx.as_mut()?;

        loop {
            match messages_rx.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = %self.topic, skipped, "subscription lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        drop(self.messages_rx.take());

        if let Some(registry) = self.registry.upgrade() {
            in_process_delivery_channel::remove_if_unsubscribed(&registry, &self.topic);
        }
    }
}
