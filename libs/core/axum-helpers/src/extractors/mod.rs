//! Custom extractors for Axum handlers.
//!
//! Both extractors turn their rejections into [`AppError`](crate::errors::AppError)
//! so malformed input is reported with the standard error envelope.

pub mod json;
pub mod validated_query;

pub use json::ApiJson;
pub use validated_query::ValidatedQuery;
