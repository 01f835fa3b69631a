use contracts::domain::a001_category::CategoryFilters;
use leptos::prelude::*;

use crate::domain::a002_calculate_cpi::lifecycle::HttpCpiLifecycle;
use crate::domain::a002_calculate_cpi::state::RequestsState;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::system::auth::context::AuthState;

/// Application state container, created by the composition root and shared
/// through context.
#[derive(Clone, Copy)]
pub struct AppStore {
    pub auth: RwSignal<AuthState>,
    pub requests: RwSignal<RequestsState>,
    pub filters: RwSignal<CategoryFilters>,
    config: StoredValue<AppConfig>,
}

impl AppStore {
    pub fn new(config: AppConfig) -> Self {
        Self {
            auth: RwSignal::new(AuthState::default()),
            requests: RwSignal::new(RequestsState::default()),
            filters: RwSignal::new(CategoryFilters::default()),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Resolved backend base URL
    pub fn api_base(&self) -> String {
        self.config.with_value(|c| api_base(&c.api.base_url))
    }

    pub fn image_base(&self) -> String {
        self.config.with_value(|c| c.images.base_url.clone())
    }

    pub fn lifecycle(&self) -> HttpCpiLifecycle {
        self.config.with_value(HttpCpiLifecycle::from_config)
    }

    /// Drop everything tied to the session
    pub fn reset_session(&self) {
        self.auth.update(|a| a.sign_out());
        self.requests.update(|r| r.reset());
        self.filters.set(CategoryFilters::default());
    }
}

pub fn use_app_store() -> AppStore {
    use_context::<AppStore>().expect("AppStore context not found")
}
