use crate::service::delivery_channel::Error;
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

const USER_PREFIX: &str = "user-";
const TASK_PREFIX: &str = "task-";

///
/// Push topic.
/// Displayed as `user-<id>` or `task-<id>`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Notifications of one user
    User(Uuid),

    /// Live updates of one task, visible to all its viewers
    Task(Uuid),
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topic::User(id) => write!(f, "{USER_PREFIX}{id}"),
            Topic::Task(id) => write!(f, "{TASK_PREFIX}{id}"),
        }
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (constructor, id): (fn(Uuid) -> Topic, &str) =
            if let Some(id) = s.strip_prefix(USER_PREFIX) {
                (Topic::User, id)
            } else if let Some(id) = s.strip_prefix(TASK_PREFIX) {
                (Topic::Task, id)
            } else {
                return Err(Error::InvalidTopic(s.to_string()));
            };

        let id = Uuid::from_str(id).map_err(|_| Error::InvalidTopic(s.to_string()))?;

        Ok(constructor(id))
    }
}
