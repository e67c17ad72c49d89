mod notification_type;

pub use notification_type::*;
