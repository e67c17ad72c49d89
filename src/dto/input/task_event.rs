use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::AsRefStr;
use uuid::Uuid;

///
/// Task lifecycle event produced by a committed task or comment mutation.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskEvent {
    TaskAssigned {
        task_id: Uuid,
        title: String,
        assignee: Option<Uuid>,
    },
    TaskReassigned {
        task_id: Uuid,
        title: String,
        new_assignee: Option<Uuid>,
        previous_assignee: Option<Uuid>,
    },
    TaskStatusChanged {
        task_id: Uuid,
        title: String,
        new_status: String,
        creator: Option<Uuid>,
    },
    CommentAdded {
        task_id: Uuid,
        title: String,
        comment_id: Uuid,
        author: Uuid,
        assigned_to: Option<Uuid>,
        created_by: Option<Uuid>,

        /// Users that commented on the task before this comment
        #[serde(default)]
        prior_commenters: Vec<Uuid>,

        ///
        /// Full comment row including author's public profile.
        /// Broadcast to viewers of the task.
        ///
        #[serde(default)]
        comment: Option<Value>,
    },
}

impl TaskEvent {
    pub fn task_id(&self) -> Uuid {
        match self {
            TaskEvent::TaskAssigned { task_id, .. }
            | TaskEvent::TaskReassigned { task_id, .. }
            | TaskEvent::TaskStatusChanged { task_id, .. }
            | TaskEvent::CommentAdded { task_id, .. } => *task_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TaskEvent::TaskAssigned { title, .. }
            | TaskEvent::TaskReassigned { title, .. }
            | TaskEvent::TaskStatusChanged { title, .. }
            | TaskEvent::CommentAdded { title, .. } => title,
        }
    }

    ///
    /// Checks that all required identifiers are present.
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - task_id is nil
    ///     - comment_id or author of a comment is nil
    ///
    pub fn validate(&self) -> Result<(), Error> {
        if self.task_id().is_nil() {
            return Err(Error::Validation("task_id is required"));
        }

        if let TaskEvent::CommentAdded {
            comment_id, author, ..
        } = self
        {
            if comment_id.is_nil() {
                return Err(Error::Validation("comment_id is required"));
            }
            if author.is_nil() {
                return Err(Error::Validation("author is required"));
            }
        }

        Ok(())
    }
}
