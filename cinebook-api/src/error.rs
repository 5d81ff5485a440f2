use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinebook_auth::AuthError;
use cinebook_booking::BookingError;
use cinebook_core::StoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    NotFound(String),
    Validation(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn auth_required() -> Self {
        AppError::Unauthorized("Authentication required".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::SeatConflict { available, .. } => {
                AppError::Validation(format!("Only {available} seats available"))
            }
            StoreError::Duplicate { field } => {
                AppError::Conflict(format!("Duplicate value for {field}"))
            }
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::ScreeningNotFound(_) => {
                AppError::NotFound("Screening not found".to_string())
            }
            BookingError::SeatsUnavailable { available, .. } => {
                AppError::Validation(format!("Only {available} seats available"))
            }
            BookingError::Validation(msg) => AppError::Validation(msg),
            BookingError::Storage(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::UsernameTaken => AppError::Conflict("Username already exists".to_string()),
            AuthError::EmailTaken => AppError::Conflict("Email already registered".to_string()),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::Storage(err) => AppError::Internal(err.to_string()),
        }
    }
}
