mod topic_message;
mod websockets_service_config;

pub use topic_message::*;
pub use websockets_service_config::*;
