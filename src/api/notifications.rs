//! Notification Sync
//!
//! Unread fetch on startup and read-state updates.

use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{authorized, expect_ok, read_json, ApiError};
use crate::config::AppConfig;
use crate::models::{parse_notification_list, Notification};
use crate::notifications::SyncRequest;
use crate::session::Session;

pub async fn fetch_unread(config: &AppConfig, session: &Session) -> Result<Vec<Notification>, ApiError> {
    let url = config.endpoint("notifications/unread");
    let response = authorized(Request::get(&url), session)?.send().await?;
    let body: serde_json::Value = read_json(response).await?;
    parse_notification_list(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Path for a [`SyncRequest`]; ids come from the server and are encoded
pub fn sync_path(request: &SyncRequest) -> String {
    match request {
        SyncRequest::MarkRead(id) => format!("notifications/{}/read", utf8_percent_encode(id, NON_ALPHANUMERIC)),
        SyncRequest::MarkAllRead => "notifications/mark-all-read".to_string(),
    }
}

/// Send one read-state update (`PATCH`)
pub async fn send_sync(config: &AppConfig, session: &Session, request: &SyncRequest) -> Result<(), ApiError> {
    let url = config.endpoint(&sync_path(request));
    let response = authorized(Request::patch(&url), session)?.send().await?;
    expect_ok(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_path() {
        assert_eq!(sync_path(&SyncRequest::MarkRead("n7".into())), "notifications/n7/read");
        assert_eq!(sync_path(&SyncRequest::MarkAllRead), "notifications/mark-all-read");
    }

    #[test]
    fn test_sync_path_encodes_id() {
        assert_eq!(
            sync_path(&SyncRequest::MarkRead("a/b?c".into())),
            "notifications/a%2Fb%3Fc/read"
        );
    }
}
