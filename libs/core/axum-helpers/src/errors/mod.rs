pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every failure, whatever stage raised it, is rendered with this body:
/// - `message`: Human-readable error message
/// - `statusCode`: The HTTP status, repeated in the body
/// - `error`: Machine-readable error identifier (e.g., "NOT_FOUND")
/// - `code`: Integer error code for logging/monitoring (e.g., 1004)
/// - `details`: Optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "message": "Product with ID 999 not found",
///   "statusCode": 404,
///   "error": "NOT_FOUND",
///   "code": 1004
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// HTTP status code of the response
    pub status_code: u16,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Each variant maps to exactly one status code and one [`ErrorCode`]. The
/// responder only reads [`AppError::status_code`], [`AppError::message`] and
/// [`AppError::error_code`], so adding a variant never touches the rendering path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Query validation error: {0}")]
    QueryValidation(#[from] ValidationErrors),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// A failure carrying whatever status the raiser attached.
    #[error("{status}: {message}")]
    Custom { status: StatusCode, message: String },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Build an error with an arbitrary attached status.
    ///
    /// Values that are not valid HTTP status codes fall back to 500.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        AppError::Custom {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::QueryExtractorRejection(e) => e.status(),
            AppError::QueryValidation(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Custom { status, .. } => *status,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::QueryValidation(_) | AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            AppError::Custom { .. } => ErrorCode::ApplicationError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Client-facing message. Internal failure details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::JsonExtractorRejection(e) => e.body_text(),
            AppError::QueryExtractorRejection(e) => e.body_text(),
            AppError::QueryValidation(_) => ErrorCode::ValidationError.default_message().to_string(),
            AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::MethodNotAllowed => ErrorCode::MethodNotAllowed.default_message().to_string(),
            AppError::Custom { message, .. } => message.clone(),
            AppError::InternalServerError(_) => {
                ErrorCode::InternalError.default_message().to_string()
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::QueryValidation(e) => {
                Some(serde_json::to_value(e).unwrap_or(serde_json::Value::Null))
            }
            _ => None,
        }
    }

    fn log(&self) {
        let code = self.error_code().code();
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_code = code, status = status.as_u16(), "{}", self);
        } else if matches!(
            self,
            AppError::JsonExtractorRejection(_) | AppError::QueryExtractorRejection(_)
        ) {
            tracing::warn!(error_code = code, status = status.as_u16(), "{}", self);
        } else {
            tracing::info!(error_code = code, status = status.as_u16(), "{}", self);
        }
    }

    /// Render the uniform envelope without consuming the error.
    pub fn to_error_response(&self) -> ErrorResponse {
        let code = self.error_code();
        ErrorResponse {
            message: self.message(),
            status_code: self.status_code().as_u16(),
            error: code.as_str().to_string(),
            code: code.code(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

/// Helper function to create error responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::NOT_FOUND,
///     "Not Found - /nope".to_string(),
///     ErrorCode::NotFound,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        message,
        status_code: status.as_u16(),
        error: error_code.as_str().to_string(),
        code: error_code.code(),
        details: None,
    });

    (status, body).into_response()
}
