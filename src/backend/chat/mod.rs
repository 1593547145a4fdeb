//! Chat Backend Module
//!
//! Server-side channel chat: storage, membership, ingestion and the HTTP
//! handlers in front of them.
//!
//! # Architecture
//!
//! - **`store`** - `MessageStore` and `MembershipCheck` traits, `PageRequest`
//! - **`db`** - PostgreSQL implementation of both traits
//! - **`memory`** - in-process implementation, used without `DATABASE_URL`
//!   and in tests
//! - **`service`** - `ChatService`: membership, append, broadcast
//! - **`handlers`** - `GET`/`POST /channel/{channelId}/chat`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use channel_chat::backend::chat::{ChatService, InMemoryChatStore};
//! use channel_chat::backend::realtime::ChannelBroadcaster;
//!
//! # async fn example() {
//! let store = Arc::new(InMemoryChatStore::new());
//! let broadcaster = ChannelBroadcaster::new(100);
//! let chat = ChatService::new(store.clone(), store, Arc::new(broadcaster));
//! let page = chat.history(7, None, 30).await;
//! # }
//! ```

/// Storage traits
pub mod store;

/// PostgreSQL store
pub mod db;

/// In-memory store
pub mod memory;

/// Chat ingestion service
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use db::PgChatStore;
pub use memory::InMemoryChatStore;
pub use service::{ChatError, ChatService};
pub use store::{MembershipCheck, MessageStore, PageRequest, StoreError};
