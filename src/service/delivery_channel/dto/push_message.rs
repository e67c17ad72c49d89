use super::PushEvent;
use crate::service::delivery_channel::Error;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub event: PushEvent,
    pub data: Value,
}

impl PushMessage {
    ///
    /// Creates message with serialized payload
    ///
    /// ### Errors
    /// - [Error::Serialization] when payload can't be represented as JSON
    ///
    pub fn new<T: Serialize>(event: PushEvent, payload: &T) -> Result<Self, Error> {
        let data = serde_json::to_value(payload)?;

        Ok(Self { event, data })
    }
}
