use crate::service::delivery_channel::PushEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// Message sent to websocket client for every push received on subscribed topic
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSocketFrame {
    pub topic: String,
    pub event: PushEvent,
    pub data: Value,
}
