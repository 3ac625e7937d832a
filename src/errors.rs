use axum::http::StatusCode;
use tracing::error;

use crate::storage::StorageError;

/// Error half of every handler result: a status plus a user-facing message.
pub type ApiError = (StatusCode, String);

/// Logs the repository failure and hides its details from the client.
pub fn internal(e: StorageError) -> ApiError {
    error!(error = %e, "storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.into())
}

pub fn not_found(msg: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, msg.into())
}
