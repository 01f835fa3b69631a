use leptos::prelude::Update;
use contracts::system::auth::{ChangePasswordRequest, UserCredentials, UserInfo};

use super::api;
use crate::layout::global_context::AppStore;
use crate::shared::api_error::ApiError;
use crate::shared::retry::{browser_sleep, retry_with_backoff, RetryPolicy};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// Set once the startup profile check has finished
    pub initialized: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn signed_in(&mut self, user: UserInfo) {
        self.loading = false;
        self.initialized = true;
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        *self = Self {
            initialized: true,
            ..Self::default()
        };
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_moderator(&self) -> bool {
        self.user.as_ref().map(|u| u.moderator).unwrap_or(false)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Fetch the profile, tolerating a session that is not visible yet
async fn fetch_profile(base: &str, policy: RetryPolicy) -> Result<UserInfo, ApiError> {
    retry_with_backoff(policy, || api::get_current_user(base), browser_sleep).await
}

/// Restore the session from the cookie on startup
pub async fn restore_session(store: AppStore) {
    let base = store.api_base();
    match api::get_current_user(&base).await {
        Ok(user) => {
            log::info!("Session restored for {}", user.username);
            store.auth.update(|a| a.signed_in(user));
        }
        Err(e) => {
            log::debug!("No active session: {}", e);
            store.auth.update(|a| a.sign_out());
        }
    }
}

pub async fn do_login(store: AppStore, username: String, password: String) -> Result<(), String> {
    let base = store.api_base();
    let policy = RetryPolicy::from(&store.config().auth);
    store.auth.update(|a| a.begin());

    let credentials = UserCredentials::new(username, password);
    let result = match api::login(&base, &credentials).await {
        Ok(()) => fetch_profile(&base, policy).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            log::info!("Logged in as {}", user.username);
            store.auth.update(|a| a.signed_in(user));
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Неверный логин или пароль");
            store.auth.update(|a| a.fail(message.clone()));
            Err(message)
        }
    }
}

pub async fn do_register(store: AppStore, username: String, password: String) -> Result<(), String> {
    let base = store.api_base();
    let policy = RetryPolicy::from(&store.config().auth);
    store.auth.update(|a| a.begin());

    let credentials = UserCredentials::new(username, password);
    let result = match api::register(&base, &credentials).await {
        Ok(_) => fetch_profile(&base, policy).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            log::info!("Registered {}", user.username);
            store.auth.update(|a| a.signed_in(user));
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Не удалось зарегистрироваться");
            store.auth.update(|a| a.fail(message.clone()));
            Err(message)
        }
    }
}

/// Best-effort server logout, then local reset
pub async fn do_logout(store: AppStore) {
    if let Err(e) = api::logout(&store.api_base()).await {
        log::error!("Logout request failed: {}", e);
    }
    store.reset_session();
}

pub async fn do_update_profile(store: AppStore, credentials: UserCredentials) -> Result<(), String> {
    store.auth.update(|a| a.begin());
    match api::update_profile(&store.api_base(), &credentials).await {
        Ok(user) => {
            store.auth.update(|a| a.signed_in(user));
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Не удалось обновить профиль");
            store.auth.update(|a| a.fail(message.clone()));
            Err(message)
        }
    }
}

pub async fn do_change_password(
    store: AppStore,
    old_password: String,
    new_password: String,
) -> Result<(), String> {
    store.auth.update(|a| a.begin());
    let request = ChangePasswordRequest {
        old_password,
        new_password,
    };
    match api::change_password(&store.api_base(), &request).await {
        Ok(()) => {
            store.auth.update(|a| a.loading = false);
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Не удалось изменить пароль");
            store.auth.update(|a| a.fail(message.clone()));
            Err(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(moderator: bool) -> UserInfo {
        UserInfo {
            id: Some(1),
            username: "anna".into(),
            moderator,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut state = AuthState::default();
        assert!(!state.initialized);
        state.begin();
        assert!(state.loading);

        state.signed_in(user(false));
        assert!(state.is_authenticated());
        assert!(!state.is_moderator());
        assert_eq!(state.username(), Some("anna"));
        assert!(!state.loading);

        state.sign_out();
        assert!(!state.is_authenticated());
        assert!(state.initialized);
    }

    #[test]
    fn test_failure_keeps_user_absent() {
        let mut state = AuthState::default();
        state.begin();
        state.fail("Неверный логин или пароль");
        assert!(!state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some("Неверный логин или пароль"));
    }

    #[test]
    fn test_moderator_flag() {
        let mut state = AuthState::default();
        state.signed_in(user(true));
        assert!(state.is_moderator());
    }
}
