//! User Commands
//!
//! Sign-in, registration, the signed-in user's profile and the
//! opposite-party search used by the case form's autocomplete.

use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::{authorized, expect_ok, multipart, read_json, ApiError};
use crate::account::{PasswordForm, ProfileForm, RegisterForm, SignInForm};
use crate::autocomplete::MIN_QUERY_LEN;
use crate::config::AppConfig;
use crate::models::User;
use crate::session::Session;

/// `POST /auth/login` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignedIn {
    pub access_token: String,
    pub user: User,
}

#[derive(Serialize)]
struct PasswordArgs<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// OAuth2 password form: the email goes in `username`
pub fn login_fields(form: &SignInForm) -> Vec<(&'static str, String)> {
    vec![
        ("username", form.email.trim().to_string()),
        ("password", form.password.clone()),
    ]
}

/// Exchange credentials for a token; nothing is stored here
pub async fn login(config: &AppConfig, form: &SignInForm) -> Result<SignedIn, ApiError> {
    let body = multipart(&login_fields(form), None)?;
    let url = config.endpoint("auth/login");
    let response = Request::post(&url).body(body)?.send().await?;
    read_json(response).await
}

pub async fn register(config: &AppConfig, form: &RegisterForm, photo: Option<web_sys::File>) -> Result<User, ApiError> {
    let body = multipart(&form.form_fields(), photo.as_ref().map(|file| ("file", file)))?;
    let url = config.endpoint("users/");
    let response = Request::post(&url).body(body)?.send().await?;
    read_json(response).await
}

pub async fn profile(config: &AppConfig, session: &Session) -> Result<User, ApiError> {
    let url = config.endpoint("users/profile");
    let response = authorized(Request::get(&url), session)?.send().await?;
    read_json(response).await
}

/// Returns the updated user record
pub async fn update_profile(
    config: &AppConfig,
    session: &Session,
    form: &ProfileForm,
    photo: Option<web_sys::File>,
) -> Result<User, ApiError> {
    let body = multipart(&form.form_fields(), photo.as_ref().map(|file| ("photo", file)))?;
    let url = config.endpoint("users/profile");
    let response = authorized(Request::put(&url), session)?.body(body)?.send().await?;
    read_json(response).await
}

pub async fn change_password(config: &AppConfig, session: &Session, form: &PasswordForm) -> Result<(), ApiError> {
    let url = config.endpoint("users/change-password");
    let args = PasswordArgs {
        current_password: &form.current_password,
        new_password: &form.new_password,
    };
    let response = authorized(Request::put(&url), session)?.json(&args)?.send().await?;
    expect_ok(response).await
}

pub async fn delete_account(config: &AppConfig, session: &Session) -> Result<(), ApiError> {
    let url = config.endpoint("users/account");
    let response = authorized(Request::delete(&url), session)?.send().await?;
    expect_ok(response).await
}

/// `users/search?name=<query>` with the query trimmed and encoded
pub fn user_search_path(query: &str) -> String {
    format!("users/search?name={}", utf8_percent_encode(query.trim(), NON_ALPHANUMERIC))
}

/// Search registered users by name.
///
/// Too-short queries return nothing without a request. Non-array bodies
/// are treated as no matches.
pub async fn search_users(config: &AppConfig, session: &Session, query: &str) -> Result<Vec<User>, ApiError> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }
    let url = config.endpoint(&user_search_path(query));
    let response = authorized(Request::get(&url), session)?.send().await?;
    let body: serde_json::Value = read_json(response).await?;
    Ok(users_from_body(body))
}

fn users_from_body(body: serde_json::Value) -> Vec<User> {
    match body {
        serde_json::Value::Array(_) => serde_json::from_value(body).unwrap_or_else(|e| {
            log::warn!("unexpected user search payload: {}", e);
            Vec::new()
        }),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_path_encodes() {
        assert_eq!(user_search_path("  Ana María "), "users/search?name=Ana%20Mar%C3%ADa");
        assert_eq!(user_search_path("a&b"), "users/search?name=a%26b");
    }

    #[test]
    fn test_login_fields_use_username() {
        let form = SignInForm {
            email: " lena@example.com ".into(),
            password: "pw".into(),
        };
        assert_eq!(
            login_fields(&form),
            vec![("username", "lena@example.com".to_string()), ("password", "pw".to_string())]
        );
    }

    #[test]
    fn test_signed_in_payload() {
        let body = json!({
            "access_token": "tok",
            "token_type": "bearer",
            "user": {"id": 3, "name": "Lena", "role": "user", "age": 34}
        });
        let signed_in: SignedIn = serde_json::from_value(body).unwrap();
        assert_eq!(signed_in.access_token, "tok");
        assert_eq!(signed_in.user.age, Some(34));
    }

    #[test]
    fn test_users_from_body() {
        let users = users_from_body(json!([{"id": 1, "name": "Ana", "phone": "5551234567"}]));
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].phone.as_deref(), Some("5551234567"));
        assert!(users_from_body(json!({"detail": "nope"})).is_empty());
        assert!(users_from_body(json!([{"unexpected": true}])).is_empty());
    }
}
