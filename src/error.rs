// HTTP API Error Types
use axum::{extract::rejection::BytesRejection, response::IntoResponse, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::auth::cookie::CookieError;
use crate::auth::AuthError;
use crate::database::StoreError;

/// Client-facing message for any failure that is not part of the documented flow
pub const PROCESSING_FAILED: &str = "Failed to process document";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (no credential presented)
    Unauthenticated(String),

    // 401 Unauthorized (credential rejected)
    InvalidAuth(String),

    // 404 Not Found (also covers documents owned by someone else)
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 500 Internal Server Error
    InternalError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidAuth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthenticated(msg) => msg,
            ApiError::InvalidAuth(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::InternalError(msg) => msg,
        }
    }

    /// Convert to JSON response body: `{"error": "<message>"}`
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn invalid_auth(message: impl Into<String>) -> Self {
        ApiError::InvalidAuth(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::InternalError(message.into())
    }
}

// Convert other error types to ApiError. The detail is logged, never returned.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::error!("Error handling document: token verification failed: {}", err);
        ApiError::internal_error(PROCESSING_FAILED)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Error handling document: store failure: {}", err);
        ApiError::internal_error(PROCESSING_FAILED)
    }
}

impl From<CookieError> for ApiError {
    fn from(err: CookieError) -> Self {
        tracing::error!("Error handling document: {}", err);
        ApiError::internal_error(PROCESSING_FAILED)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(err: BytesRejection) -> Self {
        tracing::error!("Error handling document: unreadable request body: {}", err.body_text());
        ApiError::internal_error(PROCESSING_FAILED)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Error handling document: invalid JSON body: {}", err);
        ApiError::internal_error(PROCESSING_FAILED)
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
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
