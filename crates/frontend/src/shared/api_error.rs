//! Errors returned by the HTTP layer.

use contracts::shared::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// Human-readable message taken from the backend's error payload
        message: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}

impl ApiError {
    /// Build a status error, extracting the message from the response body if it
    /// is a backend `ErrorResponse`
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = ErrorResponse::from_body(body)
            .and_then(|e| e.user_message().map(str::to_string));
        ApiError::Status { status, message }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn payload_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message for the user: the backend's message when present, otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.payload_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_extracted_from_payload() {
        let err = ApiError::from_status(403, r#"{"status":"FORBIDDEN","message":"Нет доступа"}"#);
        assert_eq!(err.user_message("Ошибка"), "Нет доступа");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_fallback_when_payload_missing() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.user_message("Не удалось удалить категорию"), "Не удалось удалить категорию");

        let transport = ApiError::Transport("offline".into());
        assert_eq!(transport.user_message("Ошибка сети"), "Ошибка сети");
    }

    #[test]
    fn test_not_found() {
        assert!(ApiError::from_status(404, "").is_not_found());
    }
}
