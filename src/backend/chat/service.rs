/**
 * Chat Ingestion Service
 *
 * Posting a message runs three steps in order:
 *
 * 1. Membership check - a non-participant is rejected before anything is
 *    written.
 * 2. Append - the store assigns id and creation time and returns the
 *    message enriched with sender display fields.
 * 3. Fan-out - the enriched message is published on the channel topic.
 *
 * Append and publish are not transactional. Once the append succeeds the
 * post has succeeded, whatever happens to delivery.
 *
 * History reads skip ingestion and go straight to the store.
 */
use std::sync::Arc;

use thiserror::Error;

use crate::backend::chat::store::{MembershipCheck, MessageStore, PageRequest, StoreError};
use crate::backend::realtime::broadcast::Broadcaster;
use crate::shared::{ChannelId, ChatMessage, MessageId, UserId};

/// Failure of a chat core operation
#[derive(Debug, Error)]
pub enum ChatError {
    /// The acting user has no membership record for the channel
    #[error("user {user_id} is not a participant of channel {channel_id}")]
    NotParticipant { user_id: UserId, channel_id: ChannelId },

    /// The store could not complete the operation
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

/// Entry point for posting and reading channel chat
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn MessageStore>,
    membership: Arc<dyn MembershipCheck>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn MessageStore>,
        membership: Arc<dyn MembershipCheck>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            store,
            membership,
            broadcaster,
        }
    }

    /// Post a message on behalf of `user_id`
    ///
    /// Returns the persisted message. The HTTP layer only acknowledges;
    /// subscribers receive the message through the broadcast.
    pub async fn post_message(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        if !self.membership.is_participant(user_id, channel_id).await? {
            tracing::warn!(
                "[Chat] User {} tried to post in channel {} without joining",
                user_id,
                channel_id
            );
            return Err(ChatError::NotParticipant { user_id, channel_id });
        }

        let message = self
            .store
            .append(user_id, channel_id, content)
            .await
            .map_err(|e| {
                tracing::error!(
                    "[Chat] Failed to persist message from user {} in channel {}: {:?}",
                    user_id,
                    channel_id,
                    e
                );
                ChatError::Persistence(e)
            })?;

        tracing::debug!("[Chat] Stored message {} in channel {}", message.id, channel_id);

        self.broadcaster.publish(channel_id, message.clone());

        Ok(message)
    }

    /// Read one page of channel history, newest first
    pub async fn history(
        &self,
        channel_id: ChannelId,
        cursor: Option<MessageId>,
        page_size: u32,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let request = PageRequest {
            channel_id,
            cursor,
            page_size,
        };
        self.store.page(request).await.map_err(|e| {
            tracing::error!("[Chat] Failed to load history for channel {}: {:?}", channel_id, e);
            ChatError::Persistence(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::chat::memory::InMemoryChatStore;
    use crate::backend::realtime::broadcast::ChannelBroadcaster;
    use crate::shared::SenderProfile;
    use assert_matches::assert_matches;

    /// Store whose every call fails, as a lost database connection would
    struct FailingStore;

    #[async_trait::async_trait]
    impl MessageStore for FailingStore {
        async fn append(&self, _: UserId, _: ChannelId, _: &str) -> Result<ChatMessage, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn page(&self, _: PageRequest) -> Result<Vec<ChatMessage>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    async fn fixture() -> (ChatService, Arc<InMemoryChatStore>, ChannelBroadcaster) {
        let store = Arc::new(InMemoryChatStore::new());
        for id in [1, 2] {
            store
                .add_user(SenderProfile {
                    id,
                    email: format!("user{}@example.com", id),
                    nickname: format!("user{}", id),
                    profile_image: None,
                })
                .await;
        }
        store.add_channel(7).await;
        store.join_channel(1, 7).await.unwrap();

        let broadcaster = ChannelBroadcaster::new(16);
        let service = ChatService::new(store.clone(), store.clone(), Arc::new(broadcaster.clone()));
        (service, store, broadcaster)
    }

    #[tokio::test]
    async fn test_post_persists_and_broadcasts_once() {
        let (service, store, broadcaster) = fixture().await;
        let mut subscriber = broadcaster.subscribe(7);

        let message = service.post_message(1, 7, "hello").await.unwrap();

        assert_eq!(store.message_count(7).await, 1);
        let delivered = subscriber.recv().await.unwrap();
        assert_eq!(delivered.id, message.id);
        assert_eq!(delivered.sender.email, "user1@example.com");
        assert!(subscriber.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_non_participant_is_rejected_without_side_effects() {
        let (service, store, broadcaster) = fixture().await;
        let mut subscriber = broadcaster.subscribe(7);

        let result = service.post_message(2, 7, "hello").await;

        assert_matches!(result, Err(ChatError::NotParticipant { user_id: 2, channel_id: 7 }));
        assert_eq!(store.message_count(7).await, 0);
        assert!(subscriber.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_post_without_subscribers_still_succeeds() {
        let (service, _store, _broadcaster) = fixture().await;
        assert!(service.post_message(1, 7, "anyone there?").await.is_ok());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_distinguishable() {
        let (_, store, broadcaster) = fixture().await;
        let mut subscriber = broadcaster.subscribe(7);
        let service = ChatService::new(Arc::new(FailingStore), store, Arc::new(broadcaster));

        assert_matches!(service.post_message(1, 7, "hi").await, Err(ChatError::Persistence(_)));
        assert_matches!(service.history(7, None, 10).await, Err(ChatError::Persistence(_)));
        assert!(subscriber.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_history_uses_cursor() {
        let (service, _store, _broadcaster) = fixture().await;
        for i in 0..5 {
            service.post_message(1, 7, &format!("m{}", i)).await.unwrap();
        }

        let page: Vec<_> = service
            .history(7, Some(4), 2)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(page, vec![3, 2]);
    }
}
