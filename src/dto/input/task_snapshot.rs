use super::TaskEvent;
use serde::Deserialize;
use uuid::Uuid;

///
/// Notification relevant fields of a committed task row
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskSnapshot {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub assigned_to: Option<Uuid>,
    pub created_by: Option<Uuid>,
}

impl TaskSnapshot {
    ///
    /// Event produced by creating the task.
    /// Tasks created without an assignee produce no event.
    ///
    pub fn created_event(&self) -> Option<TaskEvent> {
        self.assigned_to.map(|assignee| TaskEvent::TaskAssigned {
            task_id: self.id,
            title: self.title.clone(),
            assignee: Some(assignee),
        })
    }

    ///
    /// Events produced by changing the task from `previous` to `self`.
    /// Status change is reported before reassignment.
    ///
    pub fn update_events(&self, previous: &TaskSnapshot) -> Vec<TaskEvent> {
        let mut events = Vec::new();

        if self.status != previous.status {
            events.push(TaskEvent::TaskStatusChanged {
                task_id: self.id,
                title: self.title.clone(),
                new_status: self.status.clone(),
                creator: previous.created_by,
            });
        }

        if self.assigned_to.is_some() && self.assigned_to != previous.assigned_to {
            events.push(TaskEvent::TaskReassigned {
                task_id: self.id,
                title: self.title.clone(),
                new_assignee: self.assigned_to,
                previous_assignee: previous.assigned_to,
            });
        }

        events
    }
}
