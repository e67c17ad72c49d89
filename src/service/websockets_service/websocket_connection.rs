use super::{
    dto::{TopicMessage, WebSocketsServiceConfig},
    error::Error,
};
use crate::{
    dto::{input, output},
    service::delivery_channel::{DeliveryChannel, Subscription, Topic},
};
use anyhow::anyhow;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::{collections::HashMap, fmt::Display, net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use uuid::Uuid;

pub struct WebSocketConnection<WebSocketSink, WebSocketStream> {
    config: Arc<WebSocketsServiceConfig>,
    delivery_channel: Arc<dyn DeliveryChannel>,

    user_id: Uuid,
    user_address: SocketAddr,

    close_rx: oneshot::Receiver<()>,
    messages_tx: mpsc::Sender<TopicMessage>,
    messages_rx: mpsc::Receiver<TopicMessage>,
    forwarders: HashMap<Topic, JoinHandle<()>>,

    ws_tx: WebSocketSink,
    ws_rx: WebSocketStream,

    ping_time: Instant,
    ping_message: u32,
    pings_sent: u8,
}

impl<WebSocketSink, WebSocketStream, SinkError, StreamError>
    WebSocketConnection<WebSocketSink, WebSocketStream>
where
    WebSocketSink: Sink<Message, Error = SinkError> + Unpin,
    WebSocketStream: Stream<Item = Result<Message, StreamError>> + Unpin,
    SinkError: Display,
    StreamError: Display,
{
    pub fn new(
        config: Arc<WebSocketsServiceConfig>,
        delivery_channel: Arc<dyn DeliveryChannel>,
        user_id: Uuid,
        user_address: SocketAddr,
        close_rx: oneshot::Receiver<()>,
        ws_tx: WebSocketSink,
        ws_rx: WebSocketStream,
    ) -> Self {
        let (messages_tx, messages_rx) = mpsc::channel(config.connection_buffer_size);
        let ping_time = Instant::now() + config.ping_interval;
        let ping_message = 0;
        let pings_sent = 0;

        Self {
            config,
            delivery_channel,
            user_id,
            user_address,
            close_rx,
            messages_tx,
            messages_rx,
            forwarders: HashMap::new(),
            ws_tx,
            ws_rx,
            ping_time,
            ping_message,
            pings_sent,
        }
    }

    #[tracing::instrument(
        name = "WebSocket",
        skip_all,
        fields(
            user_id = %self.user_id,
            address = %self.user_address,
        )
    )]
    pub async fn run(mut self) {
        match self.try_run().await {
            Ok(()) => (),
            Err(Error::Close(message)) => {
                tracing::info!("closing connection: {message}");
            }
            Err(Error::Anyhow(err)) => {
                tracing::warn!("{err}");
            }
        }

        tracing::info!("closing websocket");
        match self.ws_tx.close().await {
            Ok(()) => tracing::info!("websocket closed"),
            Err(err) => tracing::warn!(%err, "failed to close websocket"),
        }
    }

    async fn try_run(&mut self) -> Result<(), Error> {
        self.subscribe(Topic::User(self.user_id)).await?;

        loop {
            tokio::select! {
                biased;

                // Wait for the server to close the connection
                _ = &mut self.close_rx => {
                    return Err(Error::Close("connection closed by server"));
                }

                // Wait for time to send the ping
                _ = sleep_until(self.ping_time) => {
                    self.process_ping().await?;
                }

                // Wait for message from the user
                message = self.ws_rx.next() => {
                    self.process_incomming_message(message).await?;
                }

                // Wait for message published on subscribed topic
                message = self.messages_rx.recv() => {
                    self.process_topic_message(message).await?;
                }
            }
        }
    }

    async fn process_ping(&mut self) -> anyhow::Result<()> {
        // If after sending 2 pings none of them is responded with a pong,
        // user is unresponsive and connection should be closed
        if self.pings_sent > 1 {
            anyhow::bail!("user unresponsive");
        }

        // If this is first ping of the heartbeat
        // it should be sent with a new message
        if self.pings_sent == 0 {
            self.ping_message += 1;
        }

        let bytes = self.ping_message.to_be_bytes().to_vec();
        self.ws_tx
            .send(Message::Ping(bytes))
            .await
            .map_err(|err| anyhow!("failed to send ping: {err}"))?;
        tracing::trace!(ping_message = self.ping_message, "ping sent");

        self.pings_sent += 1;
        self.ping_time = Instant::now() + self.config.ping_interval;

        Ok(())
    }

    async fn process_incomming_message(
        &mut self,
        message: Option<Result<Message, StreamError>>,
    ) -> Result<(), Error> {
        match message {
            Some(Ok(Message::Text(text))) => {
                tracing::debug!("processing command");
                self.process_incomming_text_message(text).await?;
                tracing::debug!("processed command");
            }
            Some(Ok(Message::Binary(_))) => {
                return Err(Error::Anyhow(anyhow!("received binary message")));
            }
            Some(Ok(Message::Ping(_))) => tracing::trace!("processed ping message"),
            Some(Ok(Message::Pong(payload))) => {
                tracing::trace!("processing pong message");
                self.process_incomming_pong_message(payload)?;
                tracing::trace!("processed pong message");
            }
            Some(Ok(Message::Close(_))) => {
                return Err(Error::Close("received close message"));
            }
            Some(Err(err)) => {
                return Err(Error::Anyhow(anyhow!(
                    "failed to read incomming message: {err}"
                )));
            }
            None => return Err(Error::Anyhow(anyhow!("incomming messages stream closed"))),
        }

        Ok(())
    }

    async fn process_incomming_text_message(&mut self, text: String) -> anyhow::Result<()> {
        let command = serde_json::from_str::<input::WebSocketCommand>(&text)
            .map_err(|err| anyhow!("failed to decode command: {err}"))?;
        let topic = Topic::from_str(&command.topic)
            .map_err(|err| anyhow!("failed to decode command: {err}"))?;

        // Since user sent a command he is responsive, so sending ping can be deferred
        self.ping_time = Instant::now() + self.config.ping_interval;
        self.pings_sent = 0;

        if let Topic::User(user_id) = topic {
            if user_id != self.user_id {
                tracing::warn!(%topic, "refused access to topic of another user");
                return Ok(());
            }
            if command.action == input::WebSocketAction::Unsubscribe {
                tracing::warn!(%topic, "refused to unsubscribe from own topic");
                return Ok(());
            }
        }

        match command.action {
            input::WebSocketAction::Subscribe => self.subscribe(topic).await?,
            input::WebSocketAction::Unsubscribe => self.unsubscribe(topic),
        }

        Ok(())
    }

    fn process_incomming_pong_message(&mut self, payload: Vec<u8>) -> anyhow::Result<()> {
        let byte_array = payload.try_into().map_err(|err: Vec<u8>| {
            anyhow!(
                "pong payload length invalid: len {} expected {}",
                err.len(),
                std::mem::size_of::<u32>()
            )
        })?;
        let pong_message = u32::from_be_bytes(byte_array);

        // Pong was delayed or no ping was sent.
        // Receiving pong in this case is not an error
        if self.pings_sent == 0 {
            tracing::trace!("pong was not expected");
            return Ok(());
        }

        // Pong was delayed and new ping had already been sent.
        // Receiving pong in this case is also not an error
        if pong_message != self.ping_message {
            tracing::trace!(
                pong_message,
                ping_message = self.ping_message,
                "pong message does not match expected message"
            );
            return Ok(());
        }

        self.ping_time = Instant::now() + self.config.ping_interval;
        self.pings_sent = 0;

        Ok(())
    }

    async fn process_topic_message(&mut self, message: Option<TopicMessage>) -> Result<(), Error> {
        let Some(TopicMessage { topic, message }) = message else {
            return Err(Error::Anyhow(anyhow!("topic messages channel closed")));
        };

        // Message was queued before user unsubscribed
        if !self.forwarders.contains_key(&topic) {
            tracing::trace!(%topic, "dropping message of unsubscribed topic");
            return Ok(());
        }

        let Some(message) = message else {
            self.forwarders.remove(&topic);
            return match topic == Topic::User(self.user_id) {
                true => Err(Error::Close("user topic closed")),
                false => {
                    tracing::info!(%topic, "topic closed");
                    Ok(())
                }
            };
        };

        let frame = output::WebSocketFrame {
            topic: topic.to_string(),
            event: message.event,
            data: message.data.clone(),
        };
        let text = serde_json::to_string(&frame)
            .map_err(|err| anyhow!("failed to encode message: {err}"))?;

        self.ws_tx
            .send(Message::Text(text))
            .await
            .map_err(|err| anyhow!("sending message failed: {err}"))?;
        tracing::info!(%topic, event = message.event.as_ref(), "sent message");

        Ok(())
    }

    async fn subscribe(&mut self, topic: Topic) -> anyhow::Result<()> {
        if self.forwarders.contains_key(&topic) {
            tracing::debug!(%topic, "already subscribed");
            return Ok(());
        }
        if matches!(topic, Topic::Task(_))
            && self.task_subscriptions() >= self.config.max_task_subscriptions
        {
            tracing::warn!(%topic, "refused subscription over task topics limit");
            return Ok(());
        }

        let subscription = self
            .delivery_channel
            .subscribe(topic)
            .await
            .map_err(|err| anyhow!("failed to subscribe {topic}: {err}"))?;
        let handle = tokio::spawn(forward(subscription, self.messages_tx.clone()));
        self.forwarders.insert(topic, handle);
        tracing::info!(%topic, "subscribed");

        Ok(())
    }

    fn task_subscriptions(&self) -> usize {
        self.forwarders
            .keys()
            .filter(|topic| matches!(topic, Topic::Task(_)))
            .count()
    }

    fn unsubscribe(&mut self, topic: Topic) {
        match self.forwarders.remove(&topic) {
            Some(handle) => {
                handle.abort();
                tracing::info!(%topic, "unsubscribed");
            }
            None => tracing::debug!(%topic, "not subscribed"),
        }
    }
}

impl<WebSocketSink, WebSocketStream> Drop for WebSocketConnection<WebSocketSink, WebSocketStream> {
    fn drop(&mut self) {
        for (_, handle) in self.forwarders.drain() {
            handle.abort();
        }
    }
}

///
/// Moves messages of one subscription into connection's queue
///
async fn forward(mut subscription: Subscription, messages_tx: mpsc::Sender<TopicMessage>) {
    let topic = subscription.topic();

    loop {
        let message = subscription.recv().await;
        let closed = message.is_none();

        let send_result = messages_tx.send(TopicMessage { topic, message }).await;
        if send_result.is_err() || closed {
            break;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service::delivery_channel::{
        DeliveryChannelConfig, InProcessDeliveryChannel, PushEvent, PushMessage,
    };
    use serde_json::json;
    use std::time::Duration;
    use time::OffsetDateTime;
    use tokio::time::timeout;

    const USER: Uuid = Uuid::from_u128(1);
    const OTHER_USER: Uuid = Uuid::from_u128(2);
    const TASK: Uuid = Uuid::from_u128(100);

    #[tokio::test]
    async fn ping_is_sent_after_interval() {
        let time_begin = OffsetDateTime::now_utc();
        let ping_interval = Duration::from_millis(50);

        let mut config = create_test_config();
        config.ping_interval = ping_interval;

        let (_handle, _ws_tx, mut ws_rx, _close_tx, _channel) = start_test_connection(config);

        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message

        assert!(matches!(message, Message::Ping(_)));

        let time_now = OffsetDateTime::now_utc();
        assert!(time_now >= time_begin + ping_interval);
    }

    #[tokio::test]
    async fn ping_is_sent_after_pong_response() {
        let time_begin = OffsetDateTime::now_utc();
        let ping_interval = Duration::from_millis(50);

        let mut config = create_test_config();
        config.ping_interval = ping_interval;

        let (_handle, mut ws_tx, mut ws_rx, _close_tx, _channel) = start_test_connection(config);

        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message

        let Message::Ping(payload) = message else {
            panic!("invalid message type");
        };

        // respond with pong
        ws_tx.send(Ok(Message::Pong(payload))).await.unwrap();

        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message
        assert!(matches!(message, Message::Ping(_)));

        let time_now = OffsetDateTime::now_utc();
        assert!(time_now >= time_begin + (ping_interval * 2));
    }

    #[tokio::test]
    async fn ping_user_unresponsive() {
        let time_begin = OffsetDateTime::now_utc();
        let ping_interval = Duration::from_millis(50);

        let mut config = create_test_config();
        config.ping_interval = ping_interval;

        let (handle, _ws_tx, mut ws_rx, _close_tx, _channel) = start_test_connection(config);

        for _ in 1..=2 {
            let message = timeout(Duration::from_secs(1), ws_rx.next())
                .await
                .unwrap() // timeout
                .unwrap(); // message
            assert!(matches!(message, Message::Ping(_)));
        }

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap(); // handle should never panic

        let time_now = OffsetDateTime::now_utc();
        assert!(time_now >= time_begin + (ping_interval * 3));
    }

    #[tokio::test]
    async fn notification_sent_to_the_user() {
        let config = create_test_config();

        let (_handle, _ws_tx, mut ws_rx, _close_tx, channel) = start_test_connection(config);
        wait_for_subscribers(&channel, Topic::User(USER), 1).await;

        let message =
            PushMessage::new(PushEvent::Notification, &json!({ "title": "New Comment" })).unwrap();
        channel.publish(Topic::User(USER), message).await.unwrap();

        let frame = receive_frame(&mut ws_rx).await;

        assert_eq!(frame.topic, Topic::User(USER).to_string());
        assert_eq!(frame.event, PushEvent::Notification);
        assert_eq!(frame.data, json!({ "title": "New Comment" }));
    }

    #[tokio::test]
    async fn subscribe_task_topic() {
        let config = create_test_config();

        let (_handle, mut ws_tx, mut ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 1).await;

        let message = PushMessage::new(PushEvent::TaskUpdate, &json!({ "id": TASK })).unwrap();
        channel.publish(Topic::Task(TASK), message).await.unwrap();

        let frame = receive_frame(&mut ws_rx).await;

        assert_eq!(frame.topic, Topic::Task(TASK).to_string());
        assert_eq!(frame.event, PushEvent::TaskUpdate);
    }

    #[tokio::test]
    async fn subscribe_twice_single_subscription() {
        let config = create_test_config();

        let (_handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        send_command(&mut ws_tx, "subscribe", Topic::Task(Uuid::from_u128(101))).await;
        wait_for_subscribers(&channel, Topic::Task(Uuid::from_u128(101)), 1).await;

        assert_eq!(channel.subscribers(&Topic::Task(TASK)).await, 1);
    }

    #[tokio::test]
    async fn unsubscribe_task_topic() {
        let config = create_test_config();

        let (_handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 1).await;

        send_command(&mut ws_tx, "unsubscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 0).await;
    }

    #[tokio::test]
    async fn subscribe_over_task_topics_limit_refused() {
        let mut config = create_test_config();
        config.max_task_subscriptions = 2;

        let (handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        for id in 100..103 {
            send_command(&mut ws_tx, "subscribe", Topic::Task(Uuid::from_u128(id))).await;
        }
        // freed slot is reusable
        send_command(&mut ws_tx, "unsubscribe", Topic::Task(Uuid::from_u128(100))).await;
        send_command(&mut ws_tx, "subscribe", Topic::Task(Uuid::from_u128(103))).await;
        wait_for_subscribers(&channel, Topic::Task(Uuid::from_u128(103)), 1).await;

        wait_for_subscribers(&channel, Topic::Task(Uuid::from_u128(100)), 0).await;
        assert_eq!(channel.subscribers(&Topic::Task(Uuid::from_u128(101))).await, 1);
        assert_eq!(channel.subscribers(&Topic::Task(Uuid::from_u128(102))).await, 0);
        assert_eq!(channel.subscribers(&Topic::User(USER)).await, 1);
        assert!(!handle.is_finished());
    }

    #[tokio::test]
    async fn subscribe_other_user_topic_refused() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "subscribe", Topic::User(OTHER_USER)).await;
        // commands are processed in order
        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 1).await;

        assert_eq!(channel.subscribers(&Topic::User(OTHER_USER)).await, 0);
        assert!(!handle.is_finished());
    }

    #[tokio::test]
    async fn unsubscribe_own_topic_refused() {
        let config = create_test_config();

        let (_handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "unsubscribe", Topic::User(USER)).await;
        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 1).await;

        assert_eq!(channel.subscribers(&Topic::User(USER)).await, 1);
    }

    #[tokio::test]
    async fn response_invalid_command() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        ws_tx
            .send(Ok(Message::Text("any text message".to_string())))
            .await
            .unwrap();

        // assert thread finished after receiving invalid command
        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_invalid_topic() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        let command = json!({ "action": "subscribe", "topic": "board-1" }).to_string();
        ws_tx.send(Ok(Message::Text(command))).await.unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_unsupported_binary_message() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        ws_tx.send(Ok(Message::Binary(vec![0x00]))).await.unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_invalid_pong_message() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        ws_tx
            .send(Ok(Message::Pong(vec![0x00, 0x01])))
            .await
            .unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_close_message() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        ws_tx.send(Ok(Message::Close(None))).await.unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn response_read_error() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, _channel) = start_test_connection(config);

        ws_tx
            .send(Err(axum::Error::new("unexpected read error")))
            .await
            .unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn closed_by_server() {
        let config = create_test_config();

        let (handle, _ws_tx, _ws_rx, close_tx, _channel) = start_test_connection(config);

        close_tx.send(()).unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn closed_with_delivery_channel() {
        let config = create_test_config();

        let (handle, _ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);
        wait_for_subscribers(&channel, Topic::User(USER), 1).await;

        channel.close().await;

        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();
    }

    #[tokio::test]
    async fn finished_connection_releases_subscriptions() {
        let config = create_test_config();

        let (handle, mut ws_tx, _ws_rx, _close_tx, channel) = start_test_connection(config);

        send_command(&mut ws_tx, "subscribe", Topic::Task(TASK)).await;
        wait_for_subscribers(&channel, Topic::Task(TASK), 1).await;

        ws_tx.send(Ok(Message::Close(None))).await.unwrap();
        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap() // timeout
            .unwrap();

        wait_for_subscribers(&channel, Topic::Task(TASK), 0).await;
        wait_for_subscribers(&channel, Topic::User(USER), 0).await;
    }

    fn create_test_config() -> WebSocketsServiceConfig {
        WebSocketsServiceConfig {
            ping_interval: Duration::from_secs(1200),
            connection_buffer_size: 16,
            max_task_subscriptions: 8,
        }
    }

    async fn send_command(
        ws_tx: &mut futures::channel::mpsc::UnboundedSender<Result<Message, axum::Error>>,
        action: &str,
        topic: Topic,
    ) {
        let command = json!({ "action": action, "topic": topic.to_string() }).to_string();
        ws_tx.send(Ok(Message::Text(command))).await.unwrap();
    }

    async fn receive_frame(
        ws_rx: &mut futures::channel::mpsc::UnboundedReceiver<Message>,
    ) -> output::WebSocketFrame {
        let message = timeout(Duration::from_secs(1), ws_rx.next())
            .await
            .unwrap() // timeout
            .unwrap(); // message
        let Message::Text(text) = message else {
            panic!("invalid message type");
        };

        serde_json::from_str(&text).unwrap()
    }

    async fn wait_for_subscribers(channel: &InProcessDeliveryChannel, topic: Topic, count: usize) {
        timeout(Duration::from_secs(1), async {
            while channel.subscribers(&topic).await != count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }

    ///
    /// Starts task with connection of USER.
    ///
    /// ### Returns
    /// - handle of the connection task
    /// - sender of messages coming from the user
    /// - receiver of messages sent to the user
    /// - sender closing the connection
    /// - delivery channel used by the connection
    ///
    fn start_test_connection(
        config: WebSocketsServiceConfig,
    ) -> (
        tokio::task::JoinHandle<()>,
        futures::channel::mpsc::UnboundedSender<Result<Message, axum::Error>>,
        futures::channel::mpsc::UnboundedReceiver<Message>,
        oneshot::Sender<()>,
        Arc<InProcessDeliveryChannel>,
    ) {
        let (ws_server_tx, ws_client_rx) = futures::channel::mpsc::unbounded();
        let (ws_client_tx, ws_server_rx) = futures::channel::mpsc::unbounded();
        let (close_tx, close_rx) = oneshot::channel();
        let channel = Arc::new(InProcessDeliveryChannel::new(DeliveryChannelConfig {
            capacity: 16,
        }));

        let ws_connection = WebSocketConnection::new(
            Arc::new(config),
            channel.clone(),
            USER,
            "0.0.0.0:1234".parse().unwrap(),
            close_rx,
            ws_server_tx,
            ws_server_rx,
        );

        let handle = tokio::spawn(ws_connection.run());

        (handle, ws_client_tx, ws_client_rx, close_tx, channel)
    }
}
