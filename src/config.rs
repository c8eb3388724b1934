//! Application Configuration
//!
//! Endpoints are baked in at build time from `RESOLVEIT_API_URL`,
//! `RESOLVEIT_WS_URL` and `RESOLVEIT_LOG`, with a local storage override
//! for the API base so a deployed bundle can be pointed elsewhere.

use leptos::prelude::*;
use log::LevelFilter;

use crate::session;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
const WS_PATH: &str = "/ws/notifications";
const API_OVERRIDE_KEY: &str = "resolveit_api_url";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST base, no trailing slash
    pub api_base: String,
    /// Push endpoint, token is appended as a query parameter
    pub ws_url: String,
    pub log_level: LevelFilter,
    /// Prefix of the per-user notification cache key
    pub cache_key_prefix: String,
}

impl AppConfig {
    /// Resolve from build-time values plus the runtime override
    pub fn load() -> Self {
        let api_base = session::storage_get(API_OVERRIDE_KEY)
            .filter(|url| !url.trim().is_empty())
            .or_else(|| option_env!("RESOLVEIT_API_URL").map(str::to_string));
        Self::from_values(
            api_base.as_deref(),
            option_env!("RESOLVEIT_WS_URL"),
            option_env!("RESOLVEIT_LOG"),
        )
    }

    pub fn from_values(api_base: Option<&str>, ws_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = normalize(api_base.unwrap_or(DEFAULT_API_BASE));
        let ws_url = match ws_url {
            Some(url) => normalize(url),
            None => derive_ws_url(&api_base),
        };
        Self {
            api_base,
            ws_url,
            log_level: console_logger::parse_level(log_level.unwrap_or("info")),
            cache_key_prefix: "notifications".to_string(),
        }
    }

    /// Absolute URL for an API path such as `/cases/user`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

/// `http(s)://host` -> `ws(s)://host/ws/notifications`
pub fn derive_ws_url(api_base: &str) -> String {
    let base = if let Some(rest) = api_base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_base.to_string()
    };
    format!("{}{}", base, WS_PATH)
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None, None);
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.ws_url, "ws://localhost:8000/ws/notifications");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_trailing_slash_and_tls() {
        let config = AppConfig::from_values(Some("https://api.resolveit.app/"), None, Some("debug"));
        assert_eq!(config.api_base, "https://api.resolveit.app");
        assert_eq!(config.ws_url, "wss://api.resolveit.app/ws/notifications");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.endpoint("/cases/user"), "https://api.resolveit.app/cases/user");
        assert_eq!(config.endpoint("users/search"), "https://api.resolveit.app/users/search");
    }

    #[test]
    fn test_explicit_ws_url() {
        let config = AppConfig::from_values(None, Some("wss://push.resolveit.app/ws/"), None);
        assert_eq!(config.ws_url, "wss://push.resolveit.app/ws");
    }
}
