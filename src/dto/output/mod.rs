mod notification;
mod unread_count;
mod websocket_frame;

pub use notification::*;
pub use unread_count::*;
pub use websocket_frame::*;
