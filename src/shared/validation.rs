//! Request Validation
//!
//! Shape checks applied to path, query and body fields before a request
//! reaches the chat core. Every failure is a `SharedError::ValidationError`
//! naming the offending field.

use crate::shared::error::SharedError;
use crate::shared::message::{ChannelId, MessageId};

/// Literal accepted in `lastId` meaning "no cursor"
pub const NULL_CURSOR: &str = "null";

fn parse_positive_id(field: &str, raw: &str) -> Result<i64, SharedError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SharedError::validation(field, "value is required"));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(SharedError::validation(field, "must be a positive integer")),
        Err(_) => Err(SharedError::validation(field, "must be numeric")),
    }
}

/// Parse the `{channelId}` path segment
pub fn parse_channel_id(raw: &str) -> Result<ChannelId, SharedError> {
    parse_positive_id("channelId", raw)
}

/// Parse the `lastId` query value
///
/// Absent, empty, or the literal `"null"` all mean "start from the most
/// recent message".
pub fn parse_cursor(raw: Option<&str>) -> Result<Option<MessageId>, SharedError> {
    match raw.map(str::trim) {
        None | Some("") | Some(NULL_CURSOR) => Ok(None),
        Some(value) => parse_positive_id("lastId", value).map(Some),
    }
}

/// Resolve the `limit` query value against the configured bounds
pub fn parse_page_size(raw: Option<&str>, default: u32, max: u32) -> Result<u32, SharedError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    let size = value
        .parse::<u32>()
        .map_err(|_| SharedError::validation("limit", "must be a positive integer"))?;
    if size == 0 || size > max {
        return Err(SharedError::validation(
            "limit",
            format!("must be between 1 and {}", max),
        ));
    }
    Ok(size)
}

/// Check a message body before it is handed to the ingestion service
pub fn validate_content(content: &str, max_chars: usize) -> Result<(), SharedError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation("content", "must not be empty"));
    }
    if content.chars().count() > max_chars {
        return Err(SharedError::validation(
            "content",
            format!("must be at most {} characters", max_chars),
        ));
    }
    Ok(())
}
