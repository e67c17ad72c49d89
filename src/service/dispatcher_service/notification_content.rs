use crate::dto::{
    input::{Actor, TaskEvent},
    NotificationType,
};
use uuid::Uuid;

///
/// Display part of a notification, shared by all recipients of one event
///
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    pub notification_type: NotificationType,
    pub title: &'static str,
    pub message: String,
    pub related_id: Uuid,
}

impl NotificationContent {
    pub fn new(event: &TaskEvent, actor: &Actor) -> Self {
        let (notification_type, title, message) = match event {
            TaskEvent::TaskAssigned { title, .. } => (
                NotificationType::TaskAssigned,
                "New Task Assigned",
                format!("You have been assigned to: {title}"),
            ),
            TaskEvent::TaskReassigned { title, .. } => (
                NotificationType::TaskAssigned,
                "Task Reassigned",
                format!("You have been assigned to: {title}"),
            ),
            TaskEvent::TaskStatusChanged {
                title, new_status, ..
            } => (
                NotificationType::TaskUpdated,
                "Task Status Updated",
                format!("Task \"{title}\" status changed to {new_status}"),
            ),
            TaskEvent::CommentAdded { title, .. } => (
                NotificationType::CommentAdded,
                "New Comment",
                format!("{} commented on: {title}", actor.full_name),
            ),
        };

        Self {
            notification_type,
            title,
            message,
            related_id: event.task_id(),
        }
    }
}
