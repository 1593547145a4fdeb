/**
 * Chat Message Data Structures
 *
 * This module defines the chat message as it leaves the server, both in
 * history pages and in real-time broadcasts, together with the request
 * body accepted when posting a message.
 *
 * Messages are immutable once persisted. The `sender` block is a read-side
 * projection assembled by the message store at read time; it is never
 * stored alongside the message row.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a channel (topic room)
pub type ChannelId = i64;

/// Identifier of a user
pub type UserId = i64;

/// Identifier of a chat message, also used as the history cursor
pub type MessageId = i64;

/// Sender display fields attached to every message
///
/// This is the only part of the user/profile graph the chat path needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SenderProfile {
    /// User ID of the sender
    pub id: UserId,
    /// Sender email address
    pub email: String,
    /// Display nickname
    pub nickname: String,
    /// Reference (URL or storage key) of the profile image, if any
    pub profile_image: Option<String>,
}

/// A persisted chat message enriched with its sender
///
/// # Fields
/// * `id` - Server-assigned, strictly increasing in creation order
/// * `channel_id` - Owning channel
/// * `sender_user_id` - User who posted the message
/// * `content` - Message body as sent
/// * `created_at` - Server-assigned creation time
/// * `sender` - Display projection of the sender
///
/// # Example
/// ```rust
/// use channel_chat::shared::{ChatMessage, SenderProfile};
///
/// let sender = SenderProfile {
///     id: 3,
///     email: "alice@example.com".to_string(),
///     nickname: "alice".to_string(),
///     profile_image: None,
/// };
/// let message = ChatMessage::new(10, 7, "hello".to_string(), chrono::Utc::now(), sender);
/// assert_eq!(message.sender_user_id, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub sender_user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender: SenderProfile,
}

impl ChatMessage {
    /// Assemble a message from its stored columns and sender projection
    pub fn new(
        id: MessageId,
        channel_id: ChannelId,
        content: String,
        created_at: DateTime<Utc>,
        sender: SenderProfile,
    ) -> Self {
        Self {
            id,
            channel_id,
            sender_user_id: sender.id,
            content,
            created_at,
            sender,
        }
    }
}

/// Body of `POST /channel/{channelId}/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alice() -> SenderProfile {
        SenderProfile {
            id: 3,
            email: "alice@example.com".to_string(),
            nickname: "alice".to_string(),
            profile_image: Some("/images/alice.png".to_string()),
        }
    }

    #[test]
    fn test_new_copies_sender_id() {
        let message = ChatMessage::new(1, 7, "hi".to_string(), Utc::now(), alice());
        assert_eq!(message.sender_user_id, message.sender.id);
        assert_eq!(message.channel_id, 7);
    }

    #[test]
    fn test_serializes_camel_case() {
        let message = ChatMessage::new(1, 7, "hi".to_string(), Utc::now(), alice());
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["channelId"], 7);
        assert_eq!(json["senderUserId"], 3);
        assert_eq!(json["sender"]["nickname"], "alice");
        assert_eq!(json["sender"]["profileImage"], "/images/alice.png");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_missing_profile_image_is_null() {
        let mut sender = alice();
        sender.profile_image = None;
        let message = ChatMessage::new(1, 7, "hi".to_string(), Utc::now(), sender);
        let json = serde_json::to_value(&message).unwrap();
        assert!(json["sender"]["profileImage"].is_null());
    }

    #[test]
    fn test_post_request_deserialization() {
        let request: PostMessageRequest = serde_json::from_str(r#"{"content":"hello"}"#).unwrap();
        assert_eq!(request.content, "hello");
    }
}
