//! Shared Module
//!
//! This module contains types and data structures that do not depend on the
//! server runtime: the chat message wire format, event naming, request
//! validation, the response envelope, errors and configuration.
//!
//! # Overview
//!
//! All types are designed for serialization and transmission over HTTP and
//! Server-Sent Events.

/// Chat message data structures
pub mod message;

/// Real-time event and topic naming
pub mod event;

/// Shared error types
pub mod error;

/// Request validation helpers
pub mod validation;

/// Success response envelope
pub mod response;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{ChannelId, ChatMessage, MessageId, PostMessageRequest, SenderProfile, UserId};
pub use event::{ChannelTopic, EventType};
pub use error::SharedError;
pub use response::ApiResponse;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
