use std::time::Duration;

pub struct WebSocketsServiceConfig {
    pub ping_interval: Duration,

    /// Messages queued for one connection before forwarders wait
    pub connection_buffer_size: usize,

    /// Task topics one connection can be subscribed to at once
    pub max_task_subscriptions: usize,
}
