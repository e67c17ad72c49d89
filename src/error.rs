use crate::{repository, service::delivery_channel};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("notification not exist")]
    NotificationNotExist,

    #[error("forbidden: notification belongs to another user")]
    Forbidden,

    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("auth error: missing role {0}")]
    MissingRole(&'static str),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    #[error("{0}")]
    Delivery(#[from] delivery_channel::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        match self {
            Error::NotificationNotExist => StatusCode::NOT_FOUND,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::MissingRole(_) => StatusCode::FORBIDDEN,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into_response()
    }
}
