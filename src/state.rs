use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    notify::{NotificationHub, NotificationSink},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    /// Source of WebSocket subscriptions.
    pub hub: NotificationHub,
    /// Where services publish; the hub unless replaced.
    pub notifier: Arc<dyn NotificationSink>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        let hub = NotificationHub::new(config.notification_buffer);
        Self {
            orm,
            config: Arc::new(config),
            notifier: Arc::new(hub.clone()),
            hub,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }
}
