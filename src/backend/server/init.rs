/**
 * Server Initialization
 *
 * 1. Choose the chat store: PostgreSQL when `DATABASE_URL` is configured,
 *    the in-memory store only when explicitly enabled
 * 2. Build `AppState` around it
 * 3. Start the periodic cleanup of idle broadcast topics
 * 4. Create the router
 *
 * An unreachable database does not abort startup, but it never silently
 * swaps stores either: requests fail with persistence errors until the
 * database answers.
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;

use crate::backend::chat::{InMemoryChatStore, PgChatStore};
use crate::backend::realtime::ChannelBroadcaster;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// How often topics without subscribers are dropped
pub const TOPIC_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Reasons the application cannot be assembled
#[derive(Debug, Error)]
pub enum StartupError {
    /// Neither a database nor the in-memory store was configured
    #[error("DATABASE_URL is not set and CHAT_IN_MEMORY_STORE is not enabled")]
    NoStore,

    /// The database URL could not be turned into a pool
    #[error("invalid database configuration: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing channel chat server");

    let app_state = match config.database_url.clone() {
        Some(url) => {
            let pool = load_database(&url, config.database_acquire_timeout).await?;
            tracing::info!("Using PostgreSQL chat store");
            AppState::new(config, Arc::new(PgChatStore::new(pool)))
        }
        None if config.in_memory_store => {
            tracing::warn!("Using the in-memory chat store. Messages are lost on restart.");
            AppState::new(config, Arc::new(InMemoryChatStore::new()))
        }
        None => return Err(StartupError::NoStore),
    };

    spawn_topic_cleanup(app_state.broadcaster.clone());

    tracing::info!("Router configured with periodic cleanup task");
    Ok(create_router(app_state))
}

/// Periodically drop broadcast topics that have no subscribers left
pub fn spawn_topic_cleanup(broadcaster: ChannelBroadcaster) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TOPIC_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = broadcaster.cleanup_inactive_channels();
            tracing::debug!("[Realtime] Cleaned up {} inactive channel topics", removed);
        }
    })
}
