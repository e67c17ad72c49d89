//!
//! Per-session view of the user's notifications kept in sync
//! by initial pull, live push and optimistic mutations
//!

mod client_notification_state;
mod desktop_alerts;
mod dto;
mod error;
mod local_notifications_api;
mod notifications_api;

pub use client_notification_state::*;
pub use desktop_alerts::*;
pub use dto::*;
pub use error::*;
pub use local_notifications_api::*;
pub use notifications_api::*;
