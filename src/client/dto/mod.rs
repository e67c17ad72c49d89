mod alert_permission;
mod client_notification_state_config;
mod client_phase;

pub use alert_permission::*;
pub use client_notification_state_config::*;
pub use client_phase::*;
