//! Route Configuration Module
//!
//! - **`router`** - main router creation
//! - **`chat_routes`** - channel chat and event stream routes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use channel_chat::backend::chat::InMemoryChatStore;
//! use channel_chat::backend::routes::create_router;
//! use channel_chat::backend::server::AppState;
//! use channel_chat::shared::AppConfig;
//!
//! let state = AppState::new(AppConfig::default(), Arc::new(InMemoryChatStore::new()));
//! let router = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// Chat route handlers
pub mod chat_routes;

pub use router::create_router;
