/**
 * Error Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers can return it
 * directly. The body uses the same envelope as successful responses:
 *
 * ```json
 * {
 *   "status": 400,
 *   "message": "Error message"
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;
use crate::shared::ApiResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Error] {} -> {}", self, status);
        } else {
            tracing::debug!("[Error] {} -> {}", self, status);
        }

        let body = ApiResponse::failure(status.as_u16(), message);

        (status, Json(body)).into_response()
    }
}

/// Fallback handler for unknown routes
pub async fn not_found_fallback() -> Result<StatusCode, BackendError> {
    Err(BackendError::not_found())
}
