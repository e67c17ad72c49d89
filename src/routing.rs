use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::{self, JwtAuthorizationValidator, Role, User},
    dto::{input, output},
    error::Error,
    service::{
        dispatcher_service::DispatcherService, notifications_service::NotificationsService,
        websockets_service::WebSocketsService,
    },
};
use axum::{
    extract::{ConnectInfo, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use uuid::Uuid;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/notifications", get(get_notifications))
        .route(
            "/api/v1/notifications/unread-count",
            get(get_unread_count),
        )
        .route(
            "/api/v1/notifications/mark-all-read",
            put(put_mark_all_read),
        )
        .route("/api/v1/notifications/:id/read", put(put_mark_read))
        .route("/api/v1/notifications/:id", delete(delete_notification))
        .route("/api/v1/events", post(post_event))
        .route("/api/v1/task-updates", post(post_task_update))
        .route("/api/v1/connections/:user_id", delete(delete_connections))
        .route_layer(application_middleware.auth.clone())
        .route("/ws/v1", get(websocket_upgrade))
}

async fn get_notifications(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<output::Notification>>, Error> {
    let notifications = notifications_service.find_notifications(user.id).await?;

    Ok(Json(notifications))
}

async fn get_unread_count(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::UnreadCount>, Error> {
    let unread_count = notifications_service.count_unread(user.id).await?;

    Ok(Json(unread_count))
}

async fn put_mark_read(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    notifications_service.mark_read(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn put_mark_all_read(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, Error> {
    notifications_service.mark_all_read(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_notification(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    notifications_service.delete_notification(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn post_event(
    State(dispatcher_service): State<Arc<dyn DispatcherService>>,
    Extension(user): Extension<User>,
    Json(request): Json<input::DispatchRequest>,
) -> Result<StatusCode, Error> {
    auth::require_all_roles(&user, &[Role::ProduceEvents])?;
    request.event.validate()?;

    let input::DispatchRequest { actor, event, task } = request;
    let is_comment = matches!(event, input::TaskEvent::CommentAdded { .. });
    match task {
        // comments are broadcast as new-comment, never as task-update
        Some(task) if !is_comment => {
            let task_id = event.task_id();
            dispatcher_service
                .dispatch_task_update(&actor, task_id, vec![event], task)
                .await;
        }
        _ => dispatcher_service.dispatch(&actor, event).await,
    }

    Ok(StatusCode::ACCEPTED)
}

async fn post_task_update(
    State(dispatcher_service): State<Arc<dyn DispatcherService>>,
    Extension(user): Extension<User>,
    Json(update): Json<input::TaskUpdate>,
) -> Result<StatusCode, Error> {
    auth::require_all_roles(&user, &[Role::ProduceEvents])?;
    if update.updated.id.is_nil() {
        return Err(Error::Validation("task id is required"));
    }

    let events = update.events();
    tracing::info!(task_id = %update.updated.id, events = events.len(), "received task update");

    dispatcher_service
        .dispatch_task_update(&update.actor, update.updated.id, events, update.task)
        .await;

    Ok(StatusCode::ACCEPTED)
}

async fn delete_connections(
    State(websockets_service): State<Arc<dyn WebSocketsService>>,
    Extension(user): Extension<User>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    auth::require_all_roles(&user, &[Role::Admin])?;

    websockets_service.close_connections(user_id).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn websocket_upgrade(
    State(jwt_validator): State<JwtAuthorizationValidator>,
    State(websockets_service): State<Arc<dyn WebSocketsService>>,
    ConnectInfo(address): ConnectInfo<SocketAddr>,
    Query(token): Query<input::WebSocketToken>,
    ws: WebSocketUpgrade,
) -> Response {
    let user = match jwt_validator.authorize_token(&token.token) {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(%err, %address, "websocket auth error");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    let user_id = user.id;
    tracing::info!(%user_id, %address, "upgrading websocket connection");

    ws.on_upgrade(move |websocket| async move {
        websockets_service
            .handle_client(user_id, address, websocket)
            .await;
    })
}
