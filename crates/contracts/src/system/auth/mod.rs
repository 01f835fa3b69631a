use serde::{Deserialize, Serialize};

/// Учётные данные для входа, регистрации и изменения профиля
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Токен, который бэкенд возвращает при регистрации (дублируется в httpOnly cookie)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtToken {
    #[serde(default)]
    pub value: Option<String>,
}

/// Текущий пользователь
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub moderator: bool,
}
