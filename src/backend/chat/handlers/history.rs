/**
 * Chat History Handler
 *
 * ```http
 * GET /channel/7/chat?lastId=42&limit=30 HTTP/1.1
 * ```
 *
 * Returns the page of messages older than `lastId`, newest first. Without
 * `lastId` (or with the literal `null`) the newest page is returned. An
 * empty page means the client has reached the beginning of the channel.
 */

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::backend::chat::service::ChatService;
use crate::backend::error::BackendError;
use crate::shared::validation::{parse_channel_id, parse_cursor, parse_page_size};
use crate::shared::{ApiResponse, AppConfig, ChatMessage};

/// Query string of the history endpoint
///
/// Kept as raw strings so malformed values become 400 responses with a
/// field name rather than extractor rejections.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "lastId")]
    pub last_id: Option<String>,
    pub limit: Option<String>,
}

/// Handle GET /channel/{channel_id}/chat
pub async fn handle_chat_history(
    State(chat): State<ChatService>,
    State(config): State<Arc<AppConfig>>,
    Path(raw_channel_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, BackendError> {
    let channel_id = parse_channel_id(&raw_channel_id)?;
    let cursor = parse_cursor(query.last_id.as_deref())?;
    let page_size = parse_page_size(
        query.limit.as_deref(),
        config.default_page_size,
        config.max_page_size,
    )?;

    tracing::debug!(
        "[Chat] History for channel {} before {:?} (limit {})",
        channel_id,
        cursor,
        page_size
    );

    let messages = chat.history(channel_id, cursor, page_size).await?;
    Ok(Json(ApiResponse::success_data(messages)))
}

