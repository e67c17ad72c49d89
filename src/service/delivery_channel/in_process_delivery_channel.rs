use super::{DeliveryChannel, DeliveryChannelConfig, Error, PushMessage, Subscription, Topic};
use axum::async_trait;
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::broadcast;

pub(super) type TopicRegistry = RwLock<HashMap<Topic, broadcast::Sender<Arc<PushMessage>>>>;

///
/// Topic registry for single node deployments.
/// Every topic is a broadcast channel created on first subscription
/// and removed when its last subscription is dropped.
///
pub struct InProcessDeliveryChannel {
    config: DeliveryChannelConfig,
    closed: AtomicBool,
    topics: Arc<TopicRegistry>,
}

impl InProcessDeliveryChannel {
    pub fn new(config: DeliveryChannelConfig) -> Self {
        Self {
            config,
            closed: AtomicBool::new(false),
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    ///
    /// Number of topics with at least one subscription
    ///
    pub fn topics(&self) -> usize {
        self.topics.read().len()
    }

    ///
    /// Number of active subscriptions of the topic
    ///
    pub async fn subscribers(&self, topic: &Topic) -> usize {
        let topics = self.topics.read();
        topics
            .get(topic)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    ///
    /// Rejects further publishing and ends every subscription
    ///
    pub async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);

        let count = {
            let mut topics = self.topics.write();
            let count = topics.len();
            topics.clear();
            count
        };

        tracing::info!(topics = count, "closed delivery channel");
    }

    fn ensure_open(&self) -> Result<(), Error> {
        match self.closed.load(Ordering::SeqCst) {
            true => Err(Error::Closed),
            false => Ok(()),
        }
    }
}

pub(super) fn remove_if_unsubscribed(topics: &TopicRegistry, topic: &Topic) {
    let mut topics = topics.write();
    if topics.get(topic).is_some_and(|tx| tx.receiver_count() == 0) {
        topics.remove(topic);
        tracing::trace!(%topic, "removed topic without subscribers");
    }
}

#[async_trait]
impl DeliveryChannel for InProcessDeliveryChannel {
    async fn publish(&self, topic: Topic, message: PushMessage) -> Result<(), Error> {
        self.ensure_open()?;

        let send_result = {
            let topics = self.topics.read();
            let Some(tx) = topics.get(&topic) else {
                tracing::debug!(%topic, event = message.event.as_ref(), "no subscribers");
                return Ok(());
            };
            tx.send(Arc::new(message))
        };

        match send_result {
            Ok(receivers) => {
                tracing::debug!(%topic, receivers, "published message");
            }
            Err(_) => {
                tracing::debug!(%topic, "no subscribers");
                remove_if_unsubscribed(&self.topics, &topic);
            }
        }

        Ok(())
    }

    async fn subscribe(&self, topic: Topic) -> Result<Subscription, Error> {
        self.ensure_open()?;

        let messages_rx = self
            .topics
            .write()
            .entry(topic)
            .or_insert_with(|| broadcast::channel(self.config.capacity).0)
            .subscribe();

        tracing::debug!(%topic, "subscribed");

        Ok(Subscription::registered(topic, messages_rx, &self.topics))
    }
}
