use super::{Error, PushMessage, Subscription, Topic};
use axum::async_trait;

///
/// Best effort publish/subscribe transport.
/// Messages published to a topic without subscribers are lost.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    ///
    /// Publishes message to every current subscriber of the topic
    ///
    /// ### Errors
    /// - [Error::Closed] when channel is already closed
    ///
    async fn publish(&self, topic: Topic, message: PushMessage) -> Result<(), Error>;

    ///
    /// Subscribes to the topic.
    /// Dropping [Subscription] unsubscribes.
    ///
    /// ### Errors
    /// - [Error::Closed] when channel is already closed
    ///
    async fn subscribe(&self, topic: Topic) -> Result<Subscription, Error>;
}
