#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("delivery failure: payload serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("delivery failure: invalid topic '{0}'")]
    InvalidTopic(String),

    #[error("delivery failure: channel closed")]
    Closed,
}
