//! Real-time Update Module
//!
//! Per-channel fan-out of newly created chat messages.
//!
//! # Architecture
//!
//! - **`broadcast`** - `Broadcaster` trait and the `ChannelBroadcaster`
//!   topic registry (one `tokio::sync::broadcast` channel per chat channel)
//! - **`subscription`** - Server-Sent Events endpoint attaching a client to
//!   a channel topic
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Topic registry and publish side
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! Topics are named `channel-{id}` and every payload is emitted under the
//! `message` event name. Delivery is best effort: nothing is persisted or
//! replayed here.

/// Topic registry and publishing
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{BroadcastPayload, Broadcaster, ChannelBroadcaster};
pub use subscription::handle_channel_subscription;
