/**
 * Channel Subscription Handler
 *
 * Server-Sent Events endpoint attaching a client to one channel topic:
 *
 * ```http
 * GET /channel/7/events HTTP/1.1
 * Accept: text/event-stream
 * ```
 *
 * Every message published on `channel-7` afterwards is emitted as
 *
 * ```text
 * event: message
 * id: 42
 * data: {"id":42,"channelId":7,...}
 * ```
 *
 * Nothing is replayed on connect. A subscriber that lags behind the topic
 * buffer skips the missed messages and should refill from history.
 */
use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::ChannelBroadcaster;
use crate::shared::validation::parse_channel_id;
use crate::shared::{ChatMessage, EventType};

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

fn message_event(message: &ChatMessage) -> Option<Result<Event, Infallible>> {
    match serde_json::to_string(message) {
        Ok(data) => Some(Ok(Event::default()
            .event(EventType::Message.as_str())
            .id(message.id.to_string())
            .data(data))),
        Err(e) => {
            tracing::error!("[Realtime] Failed to serialize message {}: {:?}", message.id, e);
            None
        }
    }
}

/// Handle channel subscription (GET /channel/{channel_id}/events)
pub async fn handle_channel_subscription(
    State(broadcaster): State<ChannelBroadcaster>,
    Path(raw_channel_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, BackendError> {
    let channel_id = parse_channel_id(&raw_channel_id)?;
    let receiver = broadcaster.subscribe(channel_id);

    tracing::info!(
        "[Realtime] Subscription opened on channel {} ({} subscribers)",
        channel_id,
        broadcaster.subscriber_count(channel_id)
    );

    let stream = BroadcastStream::new(receiver).filter_map(move |item| match item {
        Ok(message) => message_event(&message),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(
                "[Realtime] Subscriber on channel {} lagged, skipped {} messages",
                channel_id,
                skipped
            );
            None
        }
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SenderProfile;

    #[test]
    fn test_message_event_is_built() {
        let sender = SenderProfile {
            id: 1,
            email: "alice@example.com".to_string(),
            nickname: "alice".to_string(),
            profile_image: None,
        };
        let message = ChatMessage::new(42, 7, "hello".to_string(), chrono::Utc::now(), sender);
        assert!(matches!(message_event(&message), Some(Ok(_))));
    }

    #[tokio::test]
    async fn test_invalid_channel_is_rejected() {
        let result = handle_channel_subscription(
            State(ChannelBroadcaster::new(4)),
            Path("abc".to_string()),
        )
        .await;
        assert!(result.is_err());
    }
}
