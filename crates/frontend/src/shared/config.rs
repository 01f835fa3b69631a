//! Client configuration.
//!
//! The default configuration is embedded in the bundle; individual values can
//! be overridden at build time through environment variables (`CPI_*`).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub notifier: NotifierConfig,
    pub auth: AuthConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty means "same origin as the page" (requests go through the dev proxy)
    pub base_url: String,
}

/// External service notified after a draft is formed
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotifierConfig {
    pub url: String,
    pub token: String,
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    pub profile_retry_attempts: u32,
    pub profile_retry_initial_delay_ms: u32,
    pub profile_retry_multiplier: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImagesConfig {
    pub base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""

[notifier]
url = "http://localhost:8001/"
token = "lab8token"
timeout_ms = 5000

[auth]
profile_retry_attempts = 4
profile_retry_initial_delay_ms = 50
profile_retry_multiplier = 2

[images]
base_url = "http://127.0.0.1:9000"
"#;

impl AppConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.notifier.timeout_ms == 0 {
            return Err(ConfigError::Invalid("notifier.timeout_ms must be positive".into()));
        }
        if self.auth.profile_retry_attempts == 0 {
            return Err(ConfigError::Invalid(
                "auth.profile_retry_attempts must be at least 1".into(),
            ));
        }
        Ok(self)
    }

    fn apply_overrides(mut self) -> Self {
        if let Some(v) = option_env!("CPI_API_BASE_URL") {
            self.api.base_url = v.to_string();
        }
        if let Some(v) = option_env!("CPI_NOTIFIER_URL") {
            self.notifier.url = v.to_string();
        }
        if let Some(v) = option_env!("CPI_NOTIFIER_TOKEN") {
            self.notifier.token = v.to_string();
        }
        if let Some(v) = option_env!("CPI_IMAGE_BASE_URL") {
            self.images.base_url = v.to_string();
        }
        self
    }
}

/// Parse a configuration document
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(contents)?;
    config.validate()
}

/// Load the embedded configuration with build-time overrides applied
pub fn load_config() -> Result<AppConfig, ConfigError> {
    parse_config(DEFAULT_CONFIG)
        .map(AppConfig::apply_overrides)
        .and_then(AppConfig::validate)
}

impl Default for AppConfig {
    fn default() -> Self {
        match load_config() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration, using built-in defaults: {}", e);
                AppConfig {
                    api: ApiConfig {
                        base_url: String::new(),
                    },
                    notifier: NotifierConfig {
                        url: "http://localhost:8001/".into(),
                        token: "lab8token".into(),
                        timeout_ms: 5000,
                    },
                    auth: AuthConfig {
                        profile_retry_attempts: 4,
                        profile_retry_initial_delay_ms: 50,
                        profile_retry_multiplier: 2,
                    },
                    images: ImagesConfig {
                        base_url: "http://127.0.0.1:9000".into(),
                    },
                }
            }
        }
    }
}
