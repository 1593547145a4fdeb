//! Application configuration module
//!
//! `AppConfig` carries every tunable of the chat server. Values are
//! assembled through `AppConfigBuilder`, which fills in defaults and
//! validates the result.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 2000;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 100;
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Secret used when `JWT_SECRET` is not configured. Development only.
pub const DEV_JWT_SECRET: &str = "channel-chat-dev-secret-change-me";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// Postgres connection URL
    pub database_url: Option<String>,
    /// How long a query waits for a pooled connection before failing
    pub database_acquire_timeout: Duration,
    /// Serve from the process-local store when no `database_url` is set.
    /// Development only: it starts empty and has no way to seed members.
    pub in_memory_store: bool,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// History page size when the request gives no `limit`
    pub default_page_size: u32,
    /// Largest accepted `limit`
    pub max_page_size: u32,
    /// Maximum characters per chat message
    pub max_content_length: usize,
    /// Buffered events per channel topic before slow subscribers lag
    pub broadcast_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            database_url: None,
            database_acquire_timeout: DEFAULT_DATABASE_ACQUIRE_TIMEOUT,
            in_memory_store: false,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CHAT_PAGE_SIZE",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue {
                key: "CHAT_PAGE_SIZE",
                message: format!("must not exceed CHAT_MAX_PAGE_SIZE ({})", self.max_page_size),
            });
        }
        if self.max_content_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CHAT_MAX_CONTENT_LENGTH",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CHAT_BROADCAST_CAPACITY",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.database_acquire_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_ACQUIRE_TIMEOUT_SECS",
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    database_acquire_timeout: Option<Duration>,
    in_memory_store: Option<bool>,
    jwt_secret: Option<String>,
    default_page_size: Option<u32>,
    max_page_size: Option<u32>,
    max_content_length: Option<usize>,
    broadcast_capacity: Option<usize>,
}

impl AppConfigBuilder {
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn database_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.database_acquire_timeout = Some(timeout);
        self
    }

    pub fn in_memory_store(mut self, enabled: bool) -> Self {
        self.in_memory_store = Some(enabled);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    pub fn max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = Some(size);
        self
    }

    pub fn max_content_length(mut self, chars: usize) -> Self {
        self.max_content_length = Some(chars);
        self
    }

    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = Some(capacity);
        self
    }

    /// Build the configuration, applying defaults and validating
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url.or(defaults.database_url),
            database_acquire_timeout: self
                .database_acquire_timeout
                .unwrap_or(defaults.database_acquire_timeout),
            in_memory_store: self.in_memory_store.unwrap_or(defaults.in_memory_store),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            default_page_size: self.default_page_size.unwrap_or(defaults.default_page_size),
            max_page_size: self.max_page_size.unwrap_or(defaults.max_page_size),
            max_content_length: self.max_content_length.unwrap_or(defaults.max_content_length),
            broadcast_capacity: self.broadcast_capacity.unwrap_or(defaults.broadcast_capacity),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
