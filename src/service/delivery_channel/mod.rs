mod delivery_channel;
mod dto;
mod error;
mod in_process_delivery_channel;
mod subscription;

pub use delivery_channel::*;
pub use dto::*;
pub use error::*;
pub use in_process_delivery_channel::*;
pub use subscription::*;
