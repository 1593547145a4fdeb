/**
 * Chat Storage Interfaces
 *
 * The chat core talks to persistence through two narrow traits:
 *
 * - `MessageStore` - append a message and read cursor-paginated history
 * - `MembershipCheck` - answer whether a user participates in a channel
 *
 * `PgChatStore` (Postgres) and `InMemoryChatStore` implement both. The
 * message store is the only read/write path for chat message rows, so the
 * id ordering it assigns is the ordering every caller observes.
 */
use thiserror::Error;

use crate::shared::{ChannelId, ChatMessage, MessageId, UserId};

/// Persistence failure
///
/// Always distinct from an empty result: "no rows" is `Ok(vec![])`, never
/// an error, and an error is never reported as an empty page.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure (connectivity, constraint violation)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The referenced channel does not exist
    #[error("channel {0} does not exist")]
    UnknownChannel(ChannelId),

    /// The referenced user does not exist
    #[error("user {0} does not exist")]
    UnknownUser(UserId),
}

/// One page of history, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub channel_id: ChannelId,
    /// Exclusive upper bound on message ids; `None` starts at the newest
    pub cursor: Option<MessageId>,
    pub page_size: u32,
}

impl PageRequest {
    pub fn latest(channel_id: ChannelId, page_size: u32) -> Self {
        Self {
            channel_id,
            cursor: None,
            page_size,
        }
    }

    pub fn before(channel_id: ChannelId, cursor: MessageId, page_size: u32) -> Self {
        Self {
            channel_id,
            cursor: Some(cursor),
            page_size,
        }
    }
}

/// Chat message persistence
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message, assigning its id and creation time
    ///
    /// Returns the stored message with sender display fields attached.
    async fn append(
        &self,
        sender_user_id: UserId,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<ChatMessage, StoreError>;

    /// Read up to `page_size` messages strictly older than the cursor,
    /// ordered by descending id
    ///
    /// A cursor that does not name a message of this channel yields an
    /// empty page.
    async fn page(&self, request: PageRequest) -> Result<Vec<ChatMessage>, StoreError>;
}

/// Channel participation lookup
#[async_trait::async_trait]
pub trait MembershipCheck: Send + Sync {
    /// True iff a membership record exists for the pair
    ///
    /// A channel that does not exist simply has no participants.
    async fn is_participant(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<bool, StoreError>;
}
