use crate::service::delivery_channel::{PushMessage, Topic};
use std::sync::Arc;

///
/// Message forwarded from topic subscription to the connection
///
pub struct TopicMessage {
    pub topic: Topic,

    /// None when topic was closed
    pub message: Option<Arc<PushMessage>>,
}
