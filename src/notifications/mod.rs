//! Live Notifications
//!
//! Push channel, local notification list and read/dismiss sync.

mod binding;
mod book;
mod cache;
mod channel;
mod provider;

pub use book::SyncRequest;
pub use channel::ConnectionState;
pub use provider::{use_notifications, NotificationProvider};
