mod actor;
mod dispatch_request;
mod task_event;
mod task_snapshot;
mod task_update;
mod websocket_command;
mod websocket_token;

pub use actor::*;
pub use dispatch_request::*;
pub use task_event::*;
pub use task_snapshot::*;
pub use task_update::*;
pub use websocket_command::*;
pub use websocket_token::*;
