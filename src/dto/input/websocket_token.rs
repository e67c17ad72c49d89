use serde::Deserialize;

///
/// Websocket clients cannot set the Authorization header,
/// so the JWT is passed in the query string.
///
#[derive(Deserialize)]
pub struct WebSocketToken {
    pub token: String,
}
