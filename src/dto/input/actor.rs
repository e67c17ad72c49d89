use serde::{Deserialize, Serialize};
use uuid::Uuid;

///
/// User whose mutation of a task or comment triggered the event
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub full_name: String,
}
