//! REST API Wrappers
//!
//! Frontend bindings to the ResolveIt HTTP API, organized by domain.
//! Every call carries the session's bearer token and returns [`ApiError`]
//! on failure.

mod cases;
mod notifications;
mod users;

use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::session::Session;

// Re-export all public items
pub use cases::*;
pub use notifications::*;
pub use users::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthorized,
    #[error("network error: {0}")]
    Network(String),
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("{0}")]
    Request(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// FastAPI-style error body: `{"detail": "..."}` or a validation list
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn detail_text(detail: &serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// Multipart body from text pairs and an optional named file part
fn multipart(fields: &[(&'static str, String)], file: Option<(&str, &web_sys::File)>) -> Result<web_sys::FormData, ApiError> {
    let js_error = |e: wasm_bindgen::JsValue| ApiError::Request(crate::session::describe(&e));
    let form = web_sys::FormData::new().map_err(js_error)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    if let Some((name, file)) = file {
        form.append_with_blob_and_filename(name, file, &file.name())
            .map_err(js_error)?;
    }
    Ok(form)
}

/// Attach the bearer token, or fail before any request is made
fn authorized(builder: RequestBuilder, session: &Session) -> Result<RequestBuilder, ApiError> {
    let bearer = session.bearer().ok_or(ApiError::Unauthorized)?;
    Ok(builder.header("Authorization", &bearer))
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let fallback = response.status_text();
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => detail_text(&body.detail),
        Err(_) => fallback,
    };
    ApiError::Status { status, detail }
}

/// Decode a successful JSON response, or turn a failed one into [`ApiError`]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from(response).await);
    }
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Check status only; the body is ignored
async fn expect_ok(response: Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}
