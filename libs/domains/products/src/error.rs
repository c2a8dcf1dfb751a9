use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::validation::PayloadRejection;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} not found")]
    NotFound(String),

    #[error(transparent)]
    InvalidPayload(#[from] PayloadRejection),

    #[error("Query parameter \"{0}\" is required")]
    MissingQueryParam(&'static str),

    /// A failure that carries its own HTTP status.
    #[error("{message}")]
    WithStatus { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::NotFound(_) => AppError::NotFound(message),
            ProductError::InvalidPayload(_) => AppError::Validation(message),
            ProductError::MissingQueryParam(_) => AppError::BadRequest(message),
            ProductError::WithStatus { status, .. } => AppError::with_status(status, message),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
