//!
//! All roles used within application
//!

use strum::{AsRefStr, IntoStaticStr};

#[derive(Debug, Clone, Copy, AsRefStr, IntoStaticStr)]
pub enum Role {
    /// Task management backend reporting committed mutations
    #[strum(serialize = "task_notifier_produce_events")]
    ProduceEvents,

    #[strum(serialize = "task_notifier_admin")]
    Admin,
}
