use super::{ApplicationEnv, Ledger};
use crate::{
    auth::JwtAuthorizationValidator,
    repository::{
        InMemoryNotificationsRepository, NotificationsRepository, NotificationsRepositoryImpl,
    },
    service::{
        delivery_channel::{DeliveryChannelConfig, InProcessDeliveryChannel},
        dispatcher_service::{DispatcherService, DispatcherServiceImpl},
        notifications_service::{NotificationsService, NotificationsServiceImpl},
        websockets_service::{WebSocketsService, WebSocketsServiceConfig, WebSocketsServiceImpl},
    },
};
use anyhow::Context;
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub notifications_service: Arc<dyn NotificationsService>,
    pub dispatcher_service: Arc<dyn DispatcherService>,
    pub websockets_service: Arc<dyn WebSocketsService>,
    pub jwt_validator: JwtAuthorizationValidator,
}

pub struct ApplicationStateToClose {
    /// Present only with mongodb ledger
    pub db_client: Option<Client>,
    pub delivery_channel: Arc<InProcessDeliveryChannel>,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    let (notifications_repository, db_client) = create_repository(env).await?;

    tracing::info!("creating delivery channel");
    let config = DeliveryChannelConfig {
        capacity: env.delivery_channel_capacity,
    };
    let delivery_channel = Arc::new(InProcessDeliveryChannel::new(config));

    tracing::info!("creating services");
    let notifications_service = NotificationsServiceImpl::new(notifications_repository.clone());
    let notifications_service = Arc::new(notifications_service);

    let dispatcher_service =
        DispatcherServiceImpl::new(notifications_repository, delivery_channel.clone());
    let dispatcher_service = Arc::new(dispatcher_service);

    let config = WebSocketsServiceConfig {
        ping_interval: env.websocket_ping_interval,
        connection_buffer_size: env.websocket_connection_buffer_size,
        max_task_subscriptions: env.websocket_max_task_subscriptions,
    };
    let websockets_service = WebSocketsServiceImpl::new(config, delivery_channel.clone());
    let websockets_service = Arc::new(websockets_service);

    let jwt_validator =
        JwtAuthorizationValidator::new(env.jwt_key.clone(), env.jwt_algorithms.clone());

    Ok((
        ApplicationState {
            notifications_service,
            dispatcher_service,
            websockets_service,
            jwt_validator,
        },
        ApplicationStateToClose {
            db_client,
            delivery_channel,
        },
    ))
}

async fn create_repository(
    env: &ApplicationEnv,
) -> anyhow::Result<(Arc<dyn NotificationsRepository>, Option<Client>)> {
    match env.ledger {
        Ledger::Memory => {
            tracing::info!("creating in memory repositories");
            let repository = InMemoryNotificationsRepository::new();

            Ok((Arc::new(repository), None))
        }
        Ledger::Mongodb => {
            let db_connection_string = env
                .db_connection_string
                .as_deref()
                .context("missing database connection string")?;
            let db_name = env.db_name.as_deref().context("missing database name")?;

            tracing::info!("connecting to database");
            let db_client_options = ClientOptions::parse(db_connection_string).await?;
            let db_client = Client::with_options(db_client_options)?;
            let db = db_client.database(db_name);

            tracing::info!("creating repositories");
            let repository = NotificationsRepositoryImpl::new(db).await?;

            Ok((Arc::new(repository), Some(db_client)))
        }
    }
}
