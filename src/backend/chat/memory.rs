//! In-memory chat store
//!
//! Process-local implementation of `MessageStore` and `MembershipCheck`.
//! Used by the test suites and as the fallback when no database is
//! configured. Users, channels and memberships are owned by channel/profile
//! management elsewhere; the seeding helpers here stand in for it.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::backend::chat::store::{MembershipCheck, MessageStore, PageRequest, StoreError};
use crate::shared::{ChannelId, ChatMessage, MessageId, SenderProfile, UserId};

#[derive(Debug, Clone)]
struct StoredMessage {
    id: MessageId,
    channel_id: ChannelId,
    sender_user_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, SenderProfile>,
    channels: HashSet<ChannelId>,
    memberships: HashSet<(UserId, ChannelId)>,
    /// Ascending by id
    messages: Vec<StoredMessage>,
    last_id: MessageId,
    last_created_at: Option<DateTime<Utc>>,
}

impl Inner {
    fn enrich(&self, stored: &StoredMessage) -> Result<ChatMessage, StoreError> {
        let sender = self
            .users
            .get(&stored.sender_user_id)
            .cloned()
            .ok_or(StoreError::UnknownUser(stored.sender_user_id))?;
        Ok(ChatMessage::new(
            stored.id,
            stored.channel_id,
            stored.content.clone(),
            stored.created_at,
            sender,
        ))
    }

    /// Wall clock, clamped so creation times never go backwards in id order
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// Chat store backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    inner: RwLock<Inner>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a user's display profile
    pub async fn add_user(&self, profile: SenderProfile) {
        self.inner.write().await.users.insert(profile.id, profile);
    }

    /// Register a channel
    pub async fn add_channel(&self, channel_id: ChannelId) {
        self.inner.write().await.channels.insert(channel_id);
    }

    /// Record that a user joined a channel
    pub async fn join_channel(&self, user_id: UserId, channel_id: ChannelId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        if !inner.channels.contains(&channel_id) {
            return Err(StoreError::UnknownChannel(channel_id));
        }
        inner.memberships.insert((user_id, channel_id));
        Ok(())
    }

    /// Number of persisted messages in a channel
    pub async fn message_count(&self, channel_id: ChannelId) -> usize {
        self.inner
            .read()
            .await
            .messages
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .count()
    }
}

#[async_trait::async_trait]
impl MessageStore for InMemoryChatStore {
    async fn append(
        &self,
        sender_user_id: UserId,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<ChatMessage, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.channels.contains(&channel_id) {
            return Err(StoreError::UnknownChannel(channel_id));
        }
        if !inner.users.contains_key(&sender_user_id) {
            return Err(StoreError::UnknownUser(sender_user_id));
        }

        // id and timestamp are assigned under the same write lock
        inner.last_id += 1;
        let stored = StoredMessage {
            id: inner.last_id,
            channel_id,
            sender_user_id,
            content: content.to_string(),
            created_at: inner.next_created_at(),
        };
        let message = inner.enrich(&stored)?;
        inner.messages.push(stored);
        Ok(message)
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<ChatMessage>, StoreError> {
        let inner = self.inner.read().await;

        let upper_bound = match request.cursor {
            Some(cursor) => {
                let known = inner
                    .messages
                    .iter()
                    .any(|m| m.id == cursor && m.channel_id == request.channel_id);
                if !known {
                    return Ok(Vec::new());
                }
                cursor
            }
            None => MessageId::MAX,
        };

        inner
            .messages
            .iter()
            .rev()
            .filter(|m| m.channel_id == request.channel_id && m.id < upper_bound)
            .take(request.page_size as usize)
            .map(|m| inner.enrich(m))
            .collect()
    }
}

#[async_trait::async_trait]
impl MembershipCheck for InMemoryChatStore {
    async fn is_participant(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .memberships
            .contains(&(user_id, channel_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn profile(id: UserId) -> SenderProfile {
        SenderProfile {
            id,
            email: format!("user{}@example.com", id),
            nickname: format!("user{}", id),
            profile_image: None,
        }
    }

    async fn seeded() -> InMemoryChatStore {
        let store = InMemoryChatStore::new();
        store.add_user(profile(1)).await;
        store.add_user(profile(2)).await;
        store.add_channel(7).await;
        store.add_channel(8).await;
        store.join_channel(1, 7).await.unwrap();
        store
    }

    fn ids(messages: &[ChatMessage]) -> Vec<MessageId> {
        messages.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids_and_times() {
        let store = seeded().await;
        let first = store.append(1, 7, "one").await.unwrap();
        let second = store.append(1, 7, "two").await.unwrap();

        assert!(second.id > first.id);
        assert!(second.created_at >= first.created_at);
        assert_eq!(second.sender.nickname, "user1");
    }

    #[tokio::test]
    async fn test_append_to_unknown_channel_fails() {
        let store = seeded().await;
        assert_matches!(store.append(1, 99, "hi").await, Err(StoreError::UnknownChannel(99)));
        assert_matches!(store.append(42, 7, "hi").await, Err(StoreError::UnknownUser(42)));
        assert_eq!(store.message_count(7).await, 0);
    }

    #[tokio::test]
    async fn test_page_walks_history_backwards() {
        let store = seeded().await;
        for i in 0..10 {
            store.append(1, 7, &format!("m{}", i)).await.unwrap();
        }

        let newest = store.page(PageRequest::latest(7, 3)).await.unwrap();
        assert_eq!(ids(&newest), vec![10, 9, 8]);

        let older = store.page(PageRequest::before(7, 8, 3)).await.unwrap();
        assert_eq!(ids(&older), vec![7, 6, 5]);

        let end = store.page(PageRequest::before(7, 1, 3)).await.unwrap();
        assert!(end.is_empty());
    }

    #[tokio::test]
    async fn test_page_ignores_other_channels() {
        let store = seeded().await;
        store.join_channel(2, 8).await.unwrap();
        let a = store.append(1, 7, "a").await.unwrap();
        let b = store.append(2, 8, "b").await.unwrap();
        let c = store.append(1, 7, "c").await.unwrap();

        let page = store.page(PageRequest::latest(7, 10)).await.unwrap();
        assert_eq!(ids(&page), vec![c.id, a.id]);

        // cursor from another channel yields nothing
        let foreign = store.page(PageRequest::before(7, b.id, 10)).await.unwrap();
        assert!(foreign.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_cursor_is_empty() {
        let store = seeded().await;
        store.append(1, 7, "a").await.unwrap();
        let page = store.page(PageRequest::before(7, 500, 10)).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_membership() {
        let store = seeded().await;
        assert!(store.is_participant(1, 7).await.unwrap());
        assert!(!store.is_participant(2, 7).await.unwrap());
        assert!(!store.is_participant(1, 404).await.unwrap());
    }

    #[tokio::test]
    async fn test_join_requires_known_entities() {
        let store = seeded().await;
        assert_matches!(store.join_channel(9, 7).await, Err(StoreError::UnknownUser(9)));
        assert_matches!(store.join_channel(1, 9).await, Err(StoreError::UnknownChannel(9)));
    }
}
