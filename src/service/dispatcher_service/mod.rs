mod dispatcher_service;
mod dispatcher_service_impl;
mod notification_content;

pub use dispatcher_service::*;
pub use dispatcher_service_impl::*;
pub use notification_content::*;
