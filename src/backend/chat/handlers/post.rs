/**
 * Post Message Handler
 *
 * ```http
 * POST /channel/7/chat HTTP/1.1
 * Authorization: Bearer <token>
 * Content-Type: application/json
 *
 * {"content": "hello"}
 * ```
 *
 * The response is only an acknowledgement. The stored message reaches
 * clients, the author included, through the `channel-7` topic.
 *
 * # Errors
 *
 * * `400 Bad Request` - malformed body, blank or oversized content, or a
 *   persistence failure
 * * `401 Unauthorized` - missing token, or the user has not joined the channel
 */

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use crate::backend::chat::service::ChatService;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::validation::{parse_channel_id, validate_content};
use crate::shared::{ApiResponse, AppConfig, PostMessageRequest, SharedError};

/// Handle POST /channel/{channel_id}/chat
pub async fn handle_post_message(
    State(chat): State<ChatService>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    Path(raw_channel_id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let channel_id = parse_channel_id(&raw_channel_id)?;

    let request: PostMessageRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("[Chat] Malformed message body from user {}: {}", user.user_id, e);
        SharedError::from(e)
    })?;
    validate_content(&request.content, config.max_content_length)?;

    let message = chat
        .post_message(user.user_id, channel_id, &request.content)
        .await?;

    tracing::info!(
        "[Chat] User {} posted message {} in channel {}",
        user.user_id,
        message.id,
        channel_id
    );

    Ok(Json(ApiResponse::success()))
}
