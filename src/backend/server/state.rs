/**
 * Application State Management
 *
 * `AppState` is the central container shared by every handler. The
 * `FromRef` implementations let a handler extract only the part it needs,
 * e.g. `State(chat): State<ChatService>`.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use channel_chat::backend::chat::ChatService;
 *
 * async fn handler(State(chat): State<ChatService>) {
 *     let page = chat.history(7, None, 30).await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::chat::service::ChatService;
use crate::backend::chat::store::{MembershipCheck, MessageStore};
use crate::backend::realtime::broadcast::ChannelBroadcaster;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Membership check, persistence and fan-out for chat messages
    pub chat: ChatService,

    /// Topic registry; SSE subscribers attach here and `chat` publishes here
    pub broadcaster: ChannelBroadcaster,
}

impl AppState {
    /// Wire a store that answers both message and membership queries
    pub fn new<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: MessageStore + MembershipCheck + 'static,
    {
        let broadcaster = ChannelBroadcaster::new(config.broadcast_capacity);
        let chat = ChatService::new(store.clone(), store, Arc::new(broadcaster.clone()));

        Self {
            config: Arc::new(config),
            chat,
            broadcaster,
        }
    }
}

impl FromRef<AppState> for ChatService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat.clone()
    }
}

impl FromRef<AppState> for ChannelBroadcaster {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broadcaster.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
