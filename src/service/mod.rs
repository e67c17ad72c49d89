pub mod delivery_channel;
pub mod dispatcher_service;
pub mod notifications_service;
pub mod recipients_resolver;
pub mod websockets_service;
