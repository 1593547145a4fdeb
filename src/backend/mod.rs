//! Backend Module
//!
//! Server-side code for channel chat, compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - storage, membership, ingestion and chat handlers
//! - **`realtime`** - per-channel broadcasting and the SSE endpoint
//! - **`auth`** - JWT session tokens
//! - **`middleware`** - request authentication
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! ```text
//! backend/
//! ├── mod.rs        - Module exports and documentation
//! ├── server/       - Server initialization and state
//! ├── routes/       - Route configuration
//! ├── chat/         - Chat store, service and handlers
//! ├── realtime/     - Topic broadcasting
//! ├── auth/         - Session tokens
//! ├── middleware/   - Request middleware
//! └── error/        - Error types
//! ```
//!
//! # Endpoints
//!
//! - `GET /channel/{channelId}/chat?lastId=&limit=` - history, newest first
//! - `POST /channel/{channelId}/chat` - post a message (Bearer token)
//! - `GET /channel/{channelId}/events` - live `message` events

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Channel chat
pub mod chat;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Session tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use chat::{ChatError, ChatService};
pub use error::BackendError;
pub use realtime::ChannelBroadcaster;
pub use server::{create_app, AppState};
