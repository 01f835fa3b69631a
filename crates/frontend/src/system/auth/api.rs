use contracts::system::auth::{ChangePasswordRequest, JwtToken, UserCredentials, UserInfo};
use gloo_net::http::Request;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{read_json, send, send_json};

/// Login with username and password; the session cookie is set by the backend
pub async fn login(base: &str, credentials: &UserCredentials) -> Result<(), ApiError> {
    send_json(Request::post(&format!("{}/api/users/login", base)), credentials).await?;
    Ok(())
}

/// Register a new user and open a session for it
pub async fn register(base: &str, credentials: &UserCredentials) -> Result<JwtToken, ApiError> {
    let response =
        send_json(Request::post(&format!("{}/api/users/register", base)), credentials).await?;
    // Some backend builds answer with an empty body; the cookie is what matters
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(JwtToken::default());
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Logout (drop the session cookie)
pub async fn logout(base: &str) -> Result<(), ApiError> {
    send(Request::post(&format!("{}/api/users/logout", base))).await?;
    Ok(())
}

/// Get current user info
pub async fn get_current_user(base: &str) -> Result<UserInfo, ApiError> {
    let response = send(Request::get(&format!("{}/api/users/me", base))).await?;
    read_json(response).await
}

/// Update username and/or password of the current user
pub async fn update_profile(base: &str, credentials: &UserCredentials) -> Result<UserInfo, ApiError> {
    let response =
        send_json(Request::put(&format!("{}/api/users/me", base)), credentials).await?;
    read_json(response).await
}

pub async fn change_password(base: &str, request: &ChangePasswordRequest) -> Result<(), ApiError> {
    send_json(
        Request::post(&format!("{}/api/users/change-password", base)),
        request,
    )
    .await?;
    Ok(())
}
