//! Channel Chat
//!
//! The chat delivery path of a channel-based social platform: members of a
//! channel post messages, every post is persisted and then fanned out to
//! live subscribers of the channel, and history is read back in pages,
//! newest first.
//!
//! # Module Structure
//!
//! - **`shared`** - types shared by the server and its clients
//!   - `ChatMessage`, `SenderProfile`, topic naming, response envelope
//!   - Request validation and `AppConfig`
//!
//! - **`backend`** - server-side code (only compiled with `ssr` feature)
//!   - Axum routes, JWT authentication, SSE subscriptions
//!   - `ChatService` over PostgreSQL or in-memory stores
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and its server
//!   dependencies
//!
//! # Usage
//!
//! ```rust,no_run
//! use channel_chat::backend::server::create_app;
//! use channel_chat::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::builder()
//!     .database_url("postgres://localhost/channel_chat")
//!     .build()
//!     .unwrap();
//! let app = create_app(config).await.unwrap();
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
