/**
 * Per-Channel Message Broadcasting
 *
 * Fan-out of newly created chat messages to every live subscriber of the
 * channel's topic (`channel-{id}`). Each topic owns one
 * `tokio::sync::broadcast` channel; subscribers attach by calling
 * `subscribe` and receive every message published after that point.
 *
 * # Delivery
 *
 * Delivery is best effort. A topic with no subscribers drops the message,
 * and a subscriber that falls more than `capacity` messages behind skips
 * the oldest ones (`RecvError::Lagged`). Neither case is reported to the
 * publisher; clients catch up through the history endpoint.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::shared::{ChannelId, ChannelTopic, ChatMessage};

/// Payload delivered to subscribers
pub type BroadcastPayload = Arc<ChatMessage>;

/// Publish side of the fan-out
pub trait Broadcaster: Send + Sync {
    /// Deliver `message` to the current subscribers of the channel's topic
    ///
    /// Returns how many subscribers it was handed to.
    fn publish(&self, channel_id: ChannelId, message: ChatMessage) -> usize;
}

/// Topic registry holding one broadcast channel per chat channel
#[derive(Clone, Debug)]
pub struct ChannelBroadcaster {
    topics: Arc<Mutex<HashMap<ChannelTopic, broadcast::Sender<BroadcastPayload>>>>,
    capacity: usize,
}

impl ChannelBroadcaster {
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    fn topics(&self) -> MutexGuard<'_, HashMap<ChannelTopic, broadcast::Sender<BroadcastPayload>>> {
        // map mutations cannot leave it half-updated
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a new subscriber to the channel's topic, creating it if needed
    pub fn subscribe(&self, channel_id: ChannelId) -> broadcast::Receiver<BroadcastPayload> {
        let topic = ChannelTopic(channel_id);
        let receiver = self
            .topics()
            .entry(topic)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        tracing::debug!("[Realtime] New subscriber on {}", topic);
        receiver
    }

    /// Number of live subscribers on the channel's topic
    pub fn subscriber_count(&self, channel_id: ChannelId) -> usize {
        self.topics()
            .get(&ChannelTopic(channel_id))
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop topics nobody is subscribed to any more
    ///
    /// Returns the number of topics removed.
    pub fn cleanup_inactive_channels(&self) -> usize {
        let mut topics = self.topics();
        let before = topics.len();
        topics.retain(|_, sender| sender.receiver_count() > 0);
        before - topics.len()
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn publish(&self, channel_id: ChannelId, message: ChatMessage) -> usize {
        let topic = ChannelTopic(channel_id);
        let Some(sender) = self.topics().get(&topic).cloned() else {
            tracing::debug!("[Realtime] No subscribers on {}, message {} not delivered", topic, message.id);
            return 0;
        };

        let message_id = message.id;
        match sender.send(Arc::new(message)) {
            Ok(subscriber_count) => {
                tracing::info!(
                    "[Realtime] Message {} broadcast on {} to {} subscribers",
                    message_id,
                    topic,
                    subscriber_count
                );
                subscriber_count
            }
            Err(_) => {
                // every receiver disconnected since the last cleanup
                tracing::debug!("[Realtime] Topic {} has no live receivers", topic);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SenderProfile;

    fn message(id: i64, channel_id: ChannelId) -> ChatMessage {
        let sender = SenderProfile {
            id: 1,
            email: "alice@example.com".to_string(),
            nickname: "alice".to_string(),
            profile_image: None,
        };
        ChatMessage::new(id, channel_id, format!("message {}", id), chrono::Utc::now(), sender)
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let broadcaster = ChannelBroadcaster::new(16);
        let mut sub1 = broadcaster.subscribe(7);
        let mut sub2 = broadcaster.subscribe(7);

        let delivered = broadcaster.publish(7, message(1, 7));
        assert_eq!(delivered, 2);

        assert_eq!(sub1.recv().await.unwrap().id, 1);
        assert_eq!(sub2.recv().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let broadcaster = ChannelBroadcaster::new(16);
        assert_eq!(broadcaster.publish(7, message(1, 7)), 0);
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let broadcaster = ChannelBroadcaster::new(16);
        let mut seven = broadcaster.subscribe(7);
        let mut eight = broadcaster.subscribe(8);

        broadcaster.publish(8, message(1, 8));

        assert!(seven.try_recv().is_err());
        assert_eq!(eight.recv().await.unwrap().channel_id, 8);
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_swallowed() {
        let broadcaster = ChannelBroadcaster::new(16);
        let receiver = broadcaster.subscribe(7);
        drop(receiver);

        assert_eq!(broadcaster.publish(7, message(1, 7)), 0);
    }

    #[tokio::test]
    async fn test_cleanup_inactive_channels() {
        let broadcaster = ChannelBroadcaster::new(16);
        let _live = broadcaster.subscribe(7);
        drop(broadcaster.subscribe(8));

        assert_eq!(broadcaster.cleanup_inactive_channels(), 1);
        assert_eq!(broadcaster.subscriber_count(7), 1);
        assert_eq!(broadcaster.subscriber_count(8), 0);
    }

    #[tokio::test]
    async fn test_per_topic_order_is_publish_order() {
        let broadcaster = ChannelBroadcaster::new(16);
        let mut receiver = broadcaster.subscribe(7);
        for id in 1..=5 {
            broadcaster.publish(7, message(id, 7));
        }
        for id in 1..=5 {
            assert_eq!(receiver.recv().await.unwrap().id, id);
        }
    }
}
