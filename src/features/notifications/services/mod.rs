mod notification_service;
mod push_client;

pub use notification_service::NotificationService;
pub use push_client::{HttpPushClient, PushClient, PushJob};
