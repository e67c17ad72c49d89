mod delivery_channel_config;
mod push_event;
mod push_message;
mod topic;

pub use delivery_channel_config::*;
pub use push_event::*;
pub use push_message::*;
pub use topic::*;
