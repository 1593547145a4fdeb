/**
 * Server Configuration
 *
 * Loads `AppConfig` from environment variables and opens the PostgreSQL
 * pool.
 *
 * # Environment
 *
 * | Variable                        | Default                        |
 * |---------------------------------|--------------------------------|
 * | `SERVER_PORT`                   | 3000                           |
 * | `DATABASE_URL`                  | required unless in-memory      |
 * | `DATABASE_ACQUIRE_TIMEOUT_SECS` | 5                              |
 * | `CHAT_IN_MEMORY_STORE`          | false                          |
 * | `JWT_SECRET`                    | development secret             |
 * | `CHAT_PAGE_SIZE`                | 30                             |
 * | `CHAT_MAX_PAGE_SIZE`            | 100                            |
 * | `CHAT_MAX_CONTENT_LENGTH`       | 2000                           |
 * | `CHAT_BROADCAST_CAPACITY`       | 100                            |
 *
 * A database that cannot be reached does not prevent startup. The pool
 * connects lazily, so every chat request fails with a persistence error
 * until the database comes back.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::config::DEV_JWT_SECRET;
use crate::shared::{AppConfig, ConfigError};

/// Read a variable and parse it, `None` when unset or blank
fn env_parsed<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Load configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut builder = AppConfig::builder();

    if let Some(port) = env_parsed::<u16>("SERVER_PORT")? {
        builder = builder.server_port(port);
    }
    if let Some(url) = env_parsed::<String>("DATABASE_URL")? {
        builder = builder.database_url(url);
    }
    if let Some(secs) = env_parsed::<u64>("DATABASE_ACQUIRE_TIMEOUT_SECS")? {
        builder = builder.database_acquire_timeout(Duration::from_secs(secs));
    }
    if let Some(enabled) = env_parsed::<bool>("CHAT_IN_MEMORY_STORE")? {
        builder = builder.in_memory_store(enabled);
    }
    match env_parsed::<String>("JWT_SECRET")? {
        Some(secret) => builder = builder.jwt_secret(secret),
        None => {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            builder = builder.jwt_secret(DEV_JWT_SECRET);
        }
    }
    if let Some(size) = env_parsed::<u32>("CHAT_PAGE_SIZE")? {
        builder = builder.default_page_size(size);
    }
    if let Some(size) = env_parsed::<u32>("CHAT_MAX_PAGE_SIZE")? {
        builder = builder.max_page_size(size);
    }
    if let Some(chars) = env_parsed::<usize>("CHAT_MAX_CONTENT_LENGTH")? {
        builder = builder.max_content_length(chars);
    }
    if let Some(capacity) = env_parsed::<usize>("CHAT_BROADCAST_CAPACITY")? {
        builder = builder.broadcast_capacity(capacity);
    }

    builder.build()
}

/// Open the PostgreSQL pool and run migrations
///
/// Only a malformed URL is an error. Connections are opened on demand, so
/// an unreachable server is logged here and then reported by each query
/// that needs it.
pub async fn load_database(
    database_url: &str,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Chat requests will fail until the database is reachable and up to date");
        }
    }

    Ok(pool)
}
