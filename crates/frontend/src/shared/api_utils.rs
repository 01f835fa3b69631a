//! API utilities for frontend-backend communication
//!
//! Provides helpers for constructing API URLs and for sending requests with
//! the session cookie attached.

use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::RequestCredentials;

use super::api_error::ApiError;

/// Get the base URL for API requests
///
/// Uses the configured base URL when it is set; otherwise requests go to the
/// page's own origin, where the dev server proxies `/api` to the backend.
///
/// # Returns
/// - API base URL like "http://localhost:8080" or "https://example.com"
/// - Empty string if window is not available
pub fn api_base(configured: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Attach the session cookie to a request
pub fn with_session(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

/// Send a request, mapping non-2xx responses to [`ApiError::Status`]
pub async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = with_session(builder)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    ensure_ok(response).await
}

/// Send a request with a JSON body
pub async fn send_json<B: serde::Serialize>(
    builder: RequestBuilder,
    body: &B,
) -> Result<Response, ApiError> {
    let request = with_session(builder)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    ensure_ok(response).await
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

/// Decode a JSON response body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
