// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::auth::AuthError;
use crate::database::StoreError;

/// One violated validation rule, reported in the `errors` array of a 422 body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub location: &'static str,
    pub param: &'static str,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// HTTP API error. Bodies are plain text except for validation failures.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized,

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity
    Validation(Vec<FieldError>),

    // 500 Internal Server Error
    InternalServerError,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized => "Unauthorized",
            ApiError::NotFound(msg) => msg,
            ApiError::Validation(_) => "Validation failed",
            ApiError::InternalServerError => "Error: internal server error",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => {
                ApiError::bad_request(format!("{} already exists", username))
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Store error: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingHeader | AuthError::MalformedHeader | AuthError::InvalidToken(_) => {
                tracing::debug!("Rejected credential: {}", err);
                ApiError::Unauthorized
            }
            other => {
                tracing::error!("Auth error: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => (status, Json(json!({ "errors": errors }))).into_response(),
            other => (status, other.message().to_string()).into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_maps_to_bad_request() {
        let err: ApiError = StoreError::DuplicateUsername("moviefan".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "moviefan already exists");
    }

    #[test]
    fn store_failures_do_not_leak_details() {
        let err: ApiError = StoreError::Migration("relation \"users\" does not exist".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("users"));
    }

    #[test]
    fn credential_errors_map_to_unauthorized() {
        let err: ApiError = AuthError::MissingHeader.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthError::Hashing("boom".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
