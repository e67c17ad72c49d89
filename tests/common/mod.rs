#![allow(dead_code)]

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use task_notifier::{
    application::{self, ApplicationEnv, ApplicationState, Ledger},
    service::delivery_channel::{InProcessDeliveryChannel, Topic},
};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const JWT_SECRET: &[u8] = b"integration tests secret";
pub const ROLE_PRODUCE_EVENTS: &str = "task_notifier_produce_events";
pub const ROLE_ADMIN: &str = "task_notifier_admin";

///
/// Application with in memory ledger listening on random local port
///
pub struct TestServer {
    pub address: SocketAddr,
    pub state: ApplicationState,
    pub delivery_channel: Arc<InProcessDeliveryChannel>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://{}/ws/v1?token={token}", self.address)
    }

    ///
    /// Waits until topic has expected number of subscribers
    ///
    pub async fn wait_for_subscribers(&self, topic: Topic, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.delivery_channel.subscribers(&topic).await != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("topic did not reach expected subscribers count");
    }
}

pub fn test_env() -> ApplicationEnv {
    ApplicationEnv {
        log_directory: "logs".to_string(),
        log_filename: "task-notifier-tests.log".to_string(),
        bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        ledger: Ledger::Memory,
        db_connection_string: None,
        db_name: None,
        max_http_content_len: 64 * 1024,
        jwt_algorithms: vec![Algorithm::HS256],
        jwt_key: DecodingKey::from_secret(JWT_SECRET),
        delivery_channel_capacity: 64,
        websocket_ping_interval: Duration::from_secs(60),
        websocket_connection_buffer_size: 32,
        websocket_max_task_subscriptions: 8,
    }
}

pub async fn spawn_server() -> anyhow::Result<TestServer> {
    let env = test_env();

    let (state, state_to_close) = application::create_state(&env).await?;
    let middleware = application::create_middleware(&env);
    let app = application::create_application(state.clone(), middleware);

    let listener = TcpListener::bind(env.bind_address).await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });

    Ok(TestServer {
        address,
        state,
        delivery_channel: state_to_close.delivery_channel,
    })
}

pub fn encode_jwt(user_id: Uuid, roles: &[&str]) -> String {
    let claims = json!({
        "sub": user_id,
        "exp": 253402210800_i64,
        "realm_access": {
            "roles": roles,
        }
    });

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .unwrap()
}

pub fn actor(id: Uuid) -> Value {
    json!({ "id": id, "full_name": "Dana Doe" })
}

pub fn task_assigned(task_id: Uuid, assignee: Uuid) -> Value {
    json!({
        "type": "task_assigned",
        "task_id": task_id,
        "title": "Ship release",
        "assignee": assignee,
    })
}

pub fn comment_added(
    task_id: Uuid,
    author: Uuid,
    assigned_to: Option<Uuid>,
    created_by: Option<Uuid>,
    prior_commenters: &[Uuid],
) -> Value {
    json!({
        "type": "comment_added",
        "task_id": task_id,
        "title": "Ship release",
        "comment_id": Uuid::new_v4(),
        "author": author,
        "assigned_to": assigned_to,
        "created_by": created_by,
        "prior_commenters": prior_commenters,
    })
}

///
/// Runs future with timeout used by every integration test
///
pub async fn within<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("timed out")
}
