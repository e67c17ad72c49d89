use super::{websocket_connection::WebSocketConnection, WebSocketsService, WebSocketsServiceConfig};
use crate::service::delivery_channel::DeliveryChannel;
use axum::{
    async_trait,
    extract::ws::{Message, WebSocket},
};
use futures::{Sink, Stream, StreamExt};
use std::{collections::HashMap, fmt::Display, net::SocketAddr, sync::Arc};
use tokio::sync::{oneshot, RwLock};
use uuid::Uuid;

///
/// Registry of open connections.
/// Every connection is registered by user and its own id
/// and removed when the connection finishes.
///
pub struct WebSocketsServiceImpl {
    config: Arc<WebSocketsServiceConfig>,
    delivery_channel: Arc<dyn DeliveryChannel>,

    users_connections: RwLock<HashMap<Uuid, HashMap<Uuid, oneshot::Sender<()>>>>,
}

impl WebSocketsServiceImpl {
    pub fn new(config: WebSocketsServiceConfig, delivery_channel: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            config: Arc::new(config),
            delivery_channel,
            users_connections: RwLock::new(HashMap::new()),
        }
    }

    async fn run_connection<WebSocketSink, WebSocketStream, SinkError, StreamError>(
        &self,
        user_id: Uuid,
        address: SocketAddr,
        ws_tx: WebSocketSink,
        ws_rx: WebSocketStream,
    ) where
        WebSocketSink: Sink<Message, Error = SinkError> + Unpin,
        WebSocketStream: Stream<Item = Result<Message, StreamError>> + Unpin,
        SinkError: Display,
        StreamError: Display,
    {
        let connection_id = Uuid::new_v4();
        let (close_tx, close_rx) = oneshot::channel();

        {
            let mut connections = self.users_connections.write().await;
            connections
                .entry(user_id)
                .or_default()
                .insert(connection_id, close_tx);
        }
        tracing::info!(%user_id, %connection_id, "registered connection");

        let connection = WebSocketConnection::new(
            self.config.clone(),
            self.delivery_channel.clone(),
            user_id,
            address,
            close_rx,
            ws_tx,
            ws_rx,
        );
        connection.run().await;

        self.unregister(user_id, connection_id).await;
    }

    async fn unregister(&self, user_id: Uuid, connection_id: Uuid) {
        let mut connections = self.users_connections.write().await;
        if let Some(user_connections) = connections.get_mut(&user_id) {
            user_connections.remove(&connection_id);
            if user_connections.is_empty() {
                connections.remove(&user_id);
            }
        }

        tracing::info!(%user_id, %connection_id, "unregistered connection");
    }
}

#[async_trait]
impl WebSocketsService for WebSocketsServiceImpl {
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket) {
        let (ws_tx, ws_rx) = websocket.split();

        self.run_connection(user_id, address, ws_tx, ws_rx).await;
    }

    async fn close_connections(&self, user_id: Uuid) {
        let user_connections = {
            let mut connections = self.users_connections.write().await;
            connections.remove(&user_id)
        }
        .unwrap_or_default();

        tracing::info!(%user_id, count = user_connections.len(), "closing user connections");

        for (_, close_tx) in user_connections {
            let _ = close_tx.send(());
        }
    }
}
