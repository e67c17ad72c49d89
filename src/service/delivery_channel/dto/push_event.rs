use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PushEvent {
    /// Stored notification, published on user topic
    Notification,

    /// Full task state, published on task topic
    TaskUpdate,

    /// Full comment with author's profile, published on task topic
    NewComment,
}
