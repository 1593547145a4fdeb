//! Response Envelope
//!
//! Every API response shares one JSON shape:
//!
//! ```json
//! { "status": 200, "message": "ok", "data": [ ... ] }
//! { "status": 401, "message": "Missing Authorization header" }
//! ```
//!
//! `data` is omitted for plain acknowledgments and for errors.

use serde::{Deserialize, Serialize};

/// Default success message
pub const OK_MESSAGE: &str = "ok";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success carrying a payload
    pub fn success_data(data: T) -> Self {
        Self {
            status: 200,
            message: OK_MESSAGE.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success acknowledgment without a payload
    pub fn success() -> Self {
        Self {
            status: 200,
            message: OK_MESSAGE.to_string(),
            data: None,
        }
    }

    /// Error body; `message` is the user-facing reason
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}
