use serde::{Deserialize, Serialize};

/// Тело ошибки, которое возвращает бэкенд
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub timestamp: Option<String>,
    /// HTTP-статус: бэкенд присылает его то числом, то строкой
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl ErrorResponse {
    /// Сообщение для пользователя: `message`, иначе `error`
    pub fn user_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Попытаться разобрать тело ответа как ошибку бэкенда
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_message() {
        let e = ErrorResponse::from_body(r#"{"error":"Bad Request","message":"Черновик не найден"}"#).unwrap();
        assert_eq!(e.user_message(), Some("Черновик не найден"));
    }

    #[test]
    fn test_falls_back_to_error() {
        let e = ErrorResponse::from_body(r#"{"error":"Forbidden","message":"  "}"#).unwrap();
        assert_eq!(e.user_message(), Some("Forbidden"));
    }

    #[test]
    fn test_numeric_status_keeps_message() {
        let e = ErrorResponse::from_body(
            r#"{"timestamp":"2025-03-01T10:00:00.000+00:00","status":409,"error":"Conflict","message":"Категория уже добавлена","path":"/api/categories/7/draft"}"#,
        )
        .unwrap();
        assert_eq!(e.user_message(), Some("Категория уже добавлена"));
        assert_eq!(e.status, Some(serde_json::json!(409)));
    }

    #[test]
    fn test_string_status_still_parses() {
        let e = ErrorResponse::from_body(r#"{"status":"FORBIDDEN","message":"Нет доступа"}"#).unwrap();
        assert_eq!(e.user_message(), Some("Нет доступа"));
    }

    #[test]
    fn test_non_json_body() {
        assert!(ErrorResponse::from_body("<html>").is_none());
    }
}
