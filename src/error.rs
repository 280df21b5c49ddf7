use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to HTTP callers. Every variant maps to a 4xx with a
/// human-readable message, except `Database` which is a 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Seat already booked")]
    SeatConflict,

    #[error("Invalid seat label: {0}")]
    InvalidSeat(String),

    #[error("Scheduling Conflict: Hall is already booked for this time slot.")]
    SchedulingConflict,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SeatConflict => StatusCode::CONFLICT,
            ApiError::InvalidSeat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // The original API reports scheduling conflicts as a plain 400
            ApiError::SchedulingConflict => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(ref e) = self {
            tracing::error!("database error: {:?}", e);
        }
        let status = self.status();
        let message = match self {
            ApiError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
