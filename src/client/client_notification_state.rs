use super::{
    AlertPermission, ClientNotificationStateConfig, ClientPhase, DesktopAlerts, Error,
    NotificationsApi, OptimisticFailurePolicy,
};
use crate::{
    dto::output,
    error,
    service::delivery_channel::{DeliveryChannel, PushEvent, Subscription, Topic},
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

///
/// Local, eventually consistent copy of the user's notifications.
///
/// Session starts with subscribing to the user's topic and pulling
/// notifications with unread counter from the ledger. Pushed notifications
/// are prepended while session is [ClientPhase::Live]. Mutations are applied
/// locally before the server confirms them.
///
pub struct ClientNotificationState {
    config: ClientNotificationStateConfig,
    delivery_channel: Arc<dyn DeliveryChannel>,
    alerts: Arc<dyn DesktopAlerts>,
    inner: Arc<Mutex<Inner>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

struct Session {
    user_id: Uuid,
    api: Arc<dyn NotificationsApi>,
}

struct Inner {
    phase: ClientPhase,
    session: Option<Session>,
    /// Bumped on every session change, stale tasks compare against it
    generation: u64,
    /// Bumped on every applied pull, undo captured before it is stale
    pull_epoch: u64,
    notifications: Vec<output::Notification>,
    unread_count: u64,
    /// Pushed while session was initializing
    pending: Vec<output::Notification>,
}

/// Session and pull a mutation was started in
#[derive(Clone, Copy, PartialEq, Eq)]
struct Epoch {
    generation: u64,
    pull: u64,
}

impl Inner {
    fn session_api(&self) -> Result<(Arc<dyn NotificationsApi>, Epoch), Error> {
        match &self.session {
            Some(session) => Ok((session.api.clone(), self.epoch())),
            None => Err(Error::Disconnected),
        }
    }

    fn epoch(&self) -> Epoch {
        Epoch {
            generation: self.generation,
            pull: self.pull_epoch,
        }
    }

    fn count_unread(&mut self) {
        self.unread_count = self
            .notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count() as u64;
    }

    ///
    /// Prepends notifications pushed before session got live,
    /// skipping the ones the pull already returned
    ///
    fn apply_pending(&mut self) {
        for notification in std::mem::take(&mut self.pending) {
            if self.notifications.iter().any(|n| n.id == notification.id) {
                tracing::debug!(id = %notification.id, "pushed notification already pulled");
                continue;
            }

            if !notification.is_read {
                self.unread_count += 1;
            }
            self.notifications.insert(0, notification);
        }
    }
}

///
/// Reverses single optimistic mutation.
/// Unread counter is recounted from local entries afterwards.
///
enum Undo {
    MarkRead {
        id: Uuid,
    },
    MarkAllRead {
        ids: Vec<Uuid>,
    },
    Delete {
        index: usize,
        notification: output::Notification,
    },
}

impl Undo {
    fn apply(self, inner: &mut Inner) {
        match self {
            Undo::MarkRead { id } => {
                let notification = inner
                    .notifications
                    .iter_mut()
                    .find(|notification| notification.id == id);

                if let Some(notification) = notification {
                    notification.is_read = false;
                }
            }
            Undo::MarkAllRead { ids } => {
                for notification in inner.notifications.iter_mut() {
                    if ids.contains(&notification.id) {
                        notification.is_read = false;
                    }
                }
            }
            Undo::Delete {
                index,
                notification,
            } => {
                if !inner.notifications.iter().any(|n| n.id == notification.id) {
                    let index = index.min(inner.notifications.len());
                    inner.notifications.insert(index, notification);
                }
            }
        }

        inner.count_unread();
    }
}

impl ClientNotificationState {
    pub fn new(
        config: ClientNotificationStateConfig,
        delivery_channel: Arc<dyn DeliveryChannel>,
        alerts: Arc<dyn DesktopAlerts>,
    ) -> Self {
        Self {
            config,
            delivery_channel,
            alerts,
            inner: Arc::new(Mutex::new(Inner {
                phase: ClientPhase::Disconnected,
                session: None,
                generation: 0,
                pull_epoch: 0,
                notifications: Vec::new(),
                unread_count: 0,
                pending: Vec::new(),
            })),
            listener: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> ClientPhase {
        self.inner.lock().phase
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.inner
            .lock()
            .session
            .as_ref()
            .map(|session| session.user_id)
    }

    ///
    /// ### Returns
    /// Notifications sorted from the newest
    ///
    pub fn notifications(&self) -> Vec<output::Notification> {
        self.inner.lock().notifications.clone()
    }

    pub fn unread_count(&self) -> u64 {
        self.inner.lock().unread_count
    }

    ///
    /// Starts session of the user, previous session is ended first.
    /// Session is [ClientPhase::Live] even when initial pull fails,
    /// call [ClientNotificationState::refresh] to retry.
    ///
    /// ### Errors
    /// - [Error::Delivery] when subscribing to the user's topic fails,
    ///     session is ended
    /// - [Error::Api] when pulling notifications fails
    /// - [Error::Disconnected] when session was ended before it got live
    ///
    pub async fn start_session(
        &self,
        user_id: Uuid,
        api: Arc<dyn NotificationsApi>,
    ) -> Result<(), Error> {
        self.end_session();

        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.pending.clear();
            inner.phase = ClientPhase::Initializing;
            inner.session = Some(Session {
                user_id,
                api: api.clone(),
            });
            inner.generation
        };
        tracing::info!(%user_id, "starting notifications session");

        let subscription = match self.delivery_channel.subscribe(Topic::User(user_id)).await {
            Ok(subscription) => subscription,
            Err(err) => {
                tracing::warn!(%err, "failed to subscribe to user topic");
                self.end_session();
                return Err(err.into());
            }
        };

        {
            let mut listener = self.listener.lock();
            if self.inner.lock().generation != generation {
                return Err(Error::Disconnected);
            }

            *listener = Some(tokio::spawn(listen(
                subscription,
                self.inner.clone(),
                self.alerts.clone(),
                generation,
            )));
        }

        let pull_result = self.pull(api.as_ref(), generation).await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return Err(Error::Disconnected);
        }
        inner.apply_pending();
        inner.phase = ClientPhase::Live;
        tracing::info!(
            notifications = inner.notifications.len(),
            unread = inner.unread_count,
            "notifications session is live"
        );

        pull_result
    }

    ///
    /// Ends session and clears local state.
    /// Calling it without active session does nothing.
    ///
    pub fn end_session(&self) {
        if let Some(listener) = self.listener.lock().take() {
            listener.abort();
        }

        let mut inner = self.inner.lock();
        if inner.session.is_none() && inner.phase == ClientPhase::Disconnected {
            return;
        }

        inner.generation += 1;
        inner.phase = ClientPhase::Disconnected;
        inner.session = None;
        inner.notifications.clear();
        inner.unread_count = 0;
        inner.pending.clear();
        tracing::info!("ended notifications session");
    }

    ///
    /// Replaces local notifications and unread counter with ledger state
    ///
    /// ### Errors
    /// - [Error::Disconnected] when there is no session
    /// - [Error::Api] when pulling notifications fails
    ///
    pub async fn refresh(&self) -> Result<(), Error> {
        let (api, epoch) = self.inner.lock().session_api()?;

        self.pull(api.as_ref(), epoch.generation).await
    }

    ///
    /// Marks notification as read locally, then on the server
    ///
    /// ### Errors
    /// - [Error::Disconnected] when there is no session
    /// - [Error::Api] when server rejects the change
    ///
    pub async fn mark_as_read(&self, id: Uuid) -> Result<(), Error> {
        let (api, epoch, undo) = {
            let mut guard = self.inner.lock();
            let (api, epoch) = guard.session_api()?;

            let inner = &mut *guard;
            let notification = inner
                .notifications
                .iter_mut()
                .find(|notification| notification.id == id && !notification.is_read);

            let undo = match notification {
                Some(notification) => {
                    notification.is_read = true;
                    inner.unread_count = inner.unread_count.saturating_sub(1);
                    Some(Undo::MarkRead { id })
                }
                None => None,
            };

            (api, epoch, undo)
        };

        let result = api.mark_as_read(id).await;
        self.settle(result, epoch, undo)
    }

    ///
    /// Marks every notification as read locally and zeroes unread counter,
    /// then does the same on the server
    ///
    /// ### Errors
    /// - [Error::Disconnected] when there is no session
    /// - [Error::Api] when server rejects the change
    ///
    pub async fn mark_all_as_read(&self) -> Result<(), Error> {
        let (api, epoch, undo) = {
            let mut guard = self.inner.lock();
            let (api, epoch) = guard.session_api()?;

            let inner = &mut *guard;
            let ids = inner
                .notifications
                .iter_mut()
                .filter(|notification| !notification.is_read)
                .map(|notification| {
                    notification.is_read = true;
                    notification.id
                })
                .collect();
            inner.unread_count = 0;

            (api, epoch, Some(Undo::MarkAllRead { ids }))
        };

        let result = api.mark_all_as_read().await;
        self.settle(result, epoch, undo)
    }

    ///
    /// Removes notification locally, then on the server.
    /// Unread counter decreases only when removed notification was unread.
    ///
    /// ### Errors
    /// - [Error::Disconnected] when there is no session
    /// - [Error::Api] when server rejects the change
    ///
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let (api, epoch, undo) = {
            let mut inner = self.inner.lock();
            let (api, epoch) = inner.session_api()?;

            let index = inner
                .notifications
                .iter()
                .position(|notification| notification.id == id);

            let undo = index.map(|index| {
                let notification = inner.notifications.remove(index);
                if !notification.is_read {
                    inner.unread_count = inner.unread_count.saturating_sub(1);
                }
                Undo::Delete {
                    index,
                    notification,
                }
            });

            (api, epoch, undo)
        };

        let result = api.delete(id).await;
        self.settle(result, epoch, undo)
    }

    ///
    /// Asks for alert permission when user was not asked yet
    ///
    /// ### Returns
    /// Current permission
    ///
    pub fn request_permission(&self) -> AlertPermission {
        match self.alerts.permission() {
            AlertPermission::Default => self.alerts.request_permission(),
            permission => permission,
        }
    }

    async fn pull(&self, api: &dyn NotificationsApi, generation: u64) -> Result<(), Error> {
        let (notifications, unread_count) =
            tokio::try_join!(api.fetch_notifications(), api.fetch_unread_count())
                .inspect_err(|err| tracing::warn!(%err, "failed to pull notifications"))?;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return Err(Error::Disconnected);
        }
        inner.notifications = notifications;
        inner.unread_count = unread_count;
        inner.pull_epoch += 1;

        Ok(())
    }

    fn settle(
        &self,
        result: Result<(), error::Error>,
        epoch: Epoch,
        undo: Option<Undo>,
    ) -> Result<(), Error> {
        let Err(err) = result else {
            return Ok(());
        };
        tracing::warn!(%err, "server rejected notification change");

        if let (OptimisticFailurePolicy::Rollback, Some(undo)) =
            (self.config.on_rejected_mutation, undo)
        {
            let mut inner = self.inner.lock();
            match inner.epoch() == epoch {
                true => undo.apply(&mut inner),
                false => tracing::debug!("state was replaced since the change, rollback skipped"),
            }
        }

        Err(err.into())
    }
}

impl Drop for ClientNotificationState {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.get_mut().take() {
            listener.abort();
        }
    }
}

async fn listen(
    mut subscription: Subscription,
    inner: Arc<Mutex<Inner>>,
    alerts: Arc<dyn DesktopAlerts>,
    generation: u64,
) {
    while let Some(message) = subscription.recv().await {
        if message.event != PushEvent::Notification {
            continue;
        }

        let notification =
            match serde_json::from_value::<output::Notification>(message.data.clone()) {
                Ok(notification) => notification,
                Err(err) => {
                    tracing::warn!(%err, "received malformed notification");
                    continue;
                }
            };

        {
            let mut inner = inner.lock();
            if inner.generation != generation {
                return;
            }
            match inner.phase {
                ClientPhase::Live => {
                    inner.notifications.insert(0, notification.clone());
                    inner.unread_count += 1;
                }
                _ => {
                    tracing::debug!(id = %notification.id, "notification pushed before session got live");
                    inner.pending.push(notification.clone());
                }
            }
        }

        if alerts.permission() == AlertPermission::Granted {
            alerts.show(&notification.title, &notification.message);
        }
    }

    tracing::debug!("notifications subscription ended");
}
