#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    /// No user session
    Disconnected,

    /// Session present, subscribing and pulling notifications
    Initializing,

    /// Subscribed and populated
    Live,
}
