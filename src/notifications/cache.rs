//! Local Storage Cache
//!
//! Persists the notification list as one JSON array under a per-user key.

use crate::models::Notification;
use crate::session;

use super::book::NotificationCache;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageCache {
    key: String,
}

impl LocalStorageCache {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl NotificationCache for LocalStorageCache {
    fn load(&self) -> Vec<Notification> {
        let Some(raw) = session::storage_get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("discarding unreadable notification cache {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn store(&self, items: &[Notification]) {
        match serde_json::to_string(items) {
            Ok(raw) => session::storage_set(&self.key, &raw),
            Err(e) => log::error!("failed to serialize notifications: {}", e),
        }
    }
}
