/**
 * Chat Routes
 *
 * - `GET  /channel/{channel_id}/chat`   - paged history
 * - `POST /channel/{channel_id}/chat`   - post a message (requires JWT)
 * - `GET  /channel/{channel_id}/events` - SSE stream of the channel topic
 *
 * Authentication is attached with `route_layer`, so it only runs for the
 * POST method router and unmatched paths still fall through to the 404
 * fallback.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::chat::handlers::{handle_chat_history, handle_post_message};
use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::handle_channel_subscription;
use crate::backend::server::state::AppState;

/// Add the channel chat routes to `router`
pub fn configure_chat_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let post_chat = post(handle_post_message)
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route(
            "/channel/{channel_id}/chat",
            get(handle_chat_history).merge(post_chat),
        )
        .route(
            "/channel/{channel_id}/events",
            get(handle_channel_subscription),
        )
}
