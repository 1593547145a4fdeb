/**
 * Real-time Event Naming
 *
 * This module defines how real-time deliveries are addressed: the topic a
 * subscriber attaches to (one per channel) and the event name a payload is
 * emitted under.
 */
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::message::ChannelId;

/// Type of real-time event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A newly created chat message
    Message,
}

impl EventType {
    /// Wire name of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Message => "message",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel broadcast topic, rendered as `channel-{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelTopic(pub ChannelId);

impl ChannelTopic {
    pub fn channel_id(&self) -> ChannelId {
        self.0
    }
}

impl fmt::Display for ChannelTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel-{}", self.0)
    }
}

impl From<ChannelId> for ChannelTopic {
    fn from(channel_id: ChannelId) -> Self {
        Self(channel_id)
    }
}
