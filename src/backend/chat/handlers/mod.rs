//! Chat Handlers Module
//!
//! Axum handlers for the channel chat endpoints.
//!
//! - **`history`** - `GET /channel/{channelId}/chat?lastId=&limit=`
//! - **`post`** - `POST /channel/{channelId}/chat` (authenticated)
//!
//! Both respond with the `{status, message, data}` envelope on success and
//! a `BackendError` otherwise.

/// Paged history reads
pub mod history;

/// Message posting
pub mod post;

pub use history::{handle_chat_history, HistoryQuery};
pub use post::handle_post_message;
