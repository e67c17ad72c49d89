use crate::{error, service::delivery_channel};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no active session")]
    Disconnected,

    #[error("request rejected: {0}")]
    Api(#[from] error::Error),

    #[error("{0}")]
    Delivery(#[from] delivery_channel::Error),
}
