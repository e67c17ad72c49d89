use crate::dto::input::{Actor, TaskEvent};
use axum::async_trait;
use serde_json::Value;
use uuid::Uuid;

///
/// Fan-out of task events: resolves recipients, stores a notification
/// for each of them and pushes it to their topic.
///
/// Called after the triggering mutation was committed, so it never fails.
/// Every internal failure is logged.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatcherService: Send + Sync {
    ///
    /// Dispatches single event.
    /// Comments are additionally broadcast on the task topic.
    ///
    async fn dispatch(&self, actor: &Actor, event: TaskEvent);

    ///
    /// Dispatches every event derived from one task update,
    /// then broadcasts updated task on the task topic once.
    ///
    async fn dispatch_task_update(
        &self,
        actor: &Actor,
        task_id: Uuid,
        events: Vec<TaskEvent>,
        task: Value,
    );
}
