use super::{Actor, TaskEvent, TaskSnapshot};
use serde::Deserialize;
use serde_json::Value;

///
/// Committed task mutation: the task before and after the change.
/// Missing `previous` means the task was just created.
///
#[derive(Debug, Deserialize)]
pub struct TaskUpdate {
    pub actor: Actor,
    #[serde(default)]
    pub previous: Option<TaskSnapshot>,
    pub updated: TaskSnapshot,

    /// Full updated task state, broadcast as is
    pub task: Value,
}

impl TaskUpdate {
    pub fn events(&self) -> Vec<TaskEvent> {
        match &self.previous {
            Some(previous) => self.updated.update_events(previous),
            None => self.updated.created_event().into_iter().collect(),
        }
    }
}
