//! JSON body extractor reporting failures through the standard envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a missing content type, malformed JSON or a body of
/// the wrong shape is rejected with an [`AppError`] instead of plain text.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ApiJson;
///
/// async fn create(ApiJson(payload): ApiJson<serde_json::Value>) -> String {
///     payload.to_string()
/// }
/// ```
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ApiJson(data))
    }
}
