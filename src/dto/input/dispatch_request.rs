use super::{Actor, TaskEvent};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    pub actor: Actor,
    pub event: TaskEvent,

    ///
    /// Full task state after the mutation.
    /// When present it is broadcast to viewers of the task.
    ///
    #[serde(default)]
    pub task: Option<Value>,
}
