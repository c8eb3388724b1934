//! Session
//!
//! The signed-in user's credential and profile as written to local storage
//! by the login flow. Components receive a [`Session`] through context
//! instead of reaching for storage themselves.

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::models::User;

pub const TOKEN_KEY: &str = "resolveit_token";
pub const USER_KEY: &str = "resolveit_user";

/// Same-tab signal that the stored token changed (`storage` only fires in other tabs)
pub const TOKEN_CHANGED_EVENT: &str = "resolveit-token-changed";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Build from raw storage values; an unparsable user record is ignored
    pub fn from_parts(token: Option<String>, user_json: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        let user = user_json.and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("unable to parse stored user: {}", e);
                None
            }
        });
        Self { token, user }
    }

    /// Read the current session from local storage
    pub fn load() -> Self {
        Self::from_parts(storage_get(TOKEN_KEY), storage_get(USER_KEY))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Local storage key for this session's notification cache
    pub fn cache_key(&self, prefix: &str) -> String {
        match self.user_id() {
            Some(id) => format!("{}:{}", prefix, id),
            None => format!("{}:anonymous", prefix),
        }
    }
}

/// Session signal shared through context
pub type SessionSignal = RwSignal<Session>;

pub fn use_session() -> SessionSignal {
    expect_context::<SessionSignal>()
}

/// Store a fresh credential; the token is written before the user record
pub fn sign_in(token: &str, user: &User) {
    storage_set(TOKEN_KEY, token);
    save_user(user);
}

/// Replace the stored user record, e.g. after a profile update
pub fn save_user(user: &User) {
    match serde_json::to_string(user) {
        Ok(raw) => storage_set(USER_KEY, &raw),
        Err(e) => log::warn!("unable to serialize user: {}", e),
    }
    notify_token_changed();
}

/// Clear the stored credential and tell this tab's listeners
pub fn logout() {
    storage_remove(TOKEN_KEY);
    storage_remove(USER_KEY);
    notify_token_changed();
}

/// Dispatch [`TOKEN_CHANGED_EVENT`] on the window
pub fn notify_token_changed() {
    let Some(window) = web_sys::window() else { return };
    match web_sys::CustomEvent::new(TOKEN_CHANGED_EVENT) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::warn!("failed to dispatch {}: {:?}", TOKEN_CHANGED_EVENT, e);
            }
        }
        Err(e) => log::warn!("failed to create {}: {:?}", TOKEN_CHANGED_EVENT, e),
    }
}

// ========================
// Local Storage Helpers
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn storage_get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn storage_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("local storage write to {} failed: {}", key, describe(&e));
        }
    }
}

pub fn storage_remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Best-effort text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = r#"{"id":12,"name":"Noor","email":"noor@example.com","role":"user"}"#;

    #[test]
    fn test_from_parts() {
        let session = Session::from_parts(Some("tok".into()), Some(USER.into()));
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.user_id(), Some(12));
        assert_eq!(session.bearer().as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn test_blank_token_is_absent() {
        let session = Session::from_parts(Some("  ".into()), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn test_bad_user_json_ignored() {
        let session = Session::from_parts(Some("tok".into()), Some("{not json".into()));
        assert!(session.user.is_none());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_cache_key_per_user() {
        let signed_in = Session::from_parts(Some("tok".into()), Some(USER.into()));
        assert_eq!(signed_in.cache_key("notifications"), "notifications:12");
        assert_eq!(Session::default().cache_key("notifications"), "notifications:anonymous");
    }
}
