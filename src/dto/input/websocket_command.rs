use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebSocketAction {
    Subscribe,
    Unsubscribe,
}

///
/// Text message sent by websocket client to manage its topics
///
#[derive(Debug, Deserialize)]
pub struct WebSocketCommand {
    pub action: WebSocketAction,
    pub topic: String,
}
