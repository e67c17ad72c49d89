mod notification_entity;

pub use notification_entity::*;
