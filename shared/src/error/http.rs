//! HTTP status code mapping and axum integration for error codes

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ProductNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (business-rule violations)
            Self::AlreadyExists
            | Self::ProductInactive
            | Self::InsufficientStock
            | Self::ProductInUse
            | Self::OrderAlreadyCancelled
            | Self::OrderAlreadyDelivered
            | Self::ReservationFailed
            | Self::OrderNotPending => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::InternalError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/shape errors,
            // including disallowed transitions between live states)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}
