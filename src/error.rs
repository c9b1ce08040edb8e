use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::booking::BookingError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Internal(msg) => {
                // Details stay in the log; the caller gets a generic body.
                error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::ClassNotFound | BookingError::RegistrationNotFound => {
                ApiError::NotFound(value.to_string())
            }
            BookingError::Forbidden => ApiError::Forbidden(value.to_string()),
            BookingError::ClassFull
            | BookingError::InvalidInput(_)
            | BookingError::InvalidTransition(_)
            | BookingError::AlreadyCancelled => ApiError::BadRequest(value.to_string()),
            BookingError::ClassRowMissing(_) => ApiError::Internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_inconsistent_storage_maps_to_generic_500() {
        let api: ApiError = BookingError::ClassRowMissing(10).into();
        assert!(matches!(api, ApiError::Internal(_)));

        // The row id stays in the log, not in the response body.
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
