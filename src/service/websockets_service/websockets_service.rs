use axum::{async_trait, extract::ws::WebSocket};
use std::net::SocketAddr;
use uuid::Uuid;

///
/// Connection manager of websocket clients
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSocketsService: Send + Sync {
    ///
    /// Serves the connection until it is closed.
    /// Connection is subscribed to user's own topic
    /// and can subscribe to task topics.
    ///
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket);

    ///
    /// Closes every connection of the user
    ///
    async fn close_connections(&self, user_id: Uuid);
}
