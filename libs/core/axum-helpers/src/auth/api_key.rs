use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, header::InvalidHeaderName},
    middleware::Next,
    response::Response,
};
use core_config::auth::ApiKeyConfig;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::errors::AppError;

/// Decides whether a presented credential is acceptable.
///
/// Implement this to back the gate with something other than a literal
/// secret (a secret manager, a key table, a remote verifier).
pub trait ApiKeyVerifier: Send + Sync + 'static {
    fn verify(&self, presented: &str) -> bool;
}

/// A single static shared secret, compared in constant time.
pub struct StaticApiKey {
    key: Vec<u8>,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().into_bytes(),
        }
    }
}

impl ApiKeyVerifier for StaticApiKey {
    fn verify(&self, presented: &str) -> bool {
        self.key.as_slice().ct_eq(presented.as_bytes()).into()
    }
}

/// Reasons a request fails the API key gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("API key is missing")]
    MissingKey,

    #[error("Invalid API key")]
    InvalidKey,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingKey => AppError::Unauthorized(err.to_string()),
            AuthError::InvalidKey => AppError::Forbidden(err.to_string()),
        }
    }
}

/// API key gate state: which header to read and who verifies it.
#[derive(Clone)]
pub struct ApiKeyAuth {
    header: HeaderName,
    verifier: Arc<dyn ApiKeyVerifier>,
}

impl ApiKeyAuth {
    pub fn new(
        header: &str,
        verifier: impl ApiKeyVerifier,
    ) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.as_bytes())?,
            verifier: Arc::new(verifier),
        })
    }

    pub fn from_config(config: &ApiKeyConfig) -> Result<Self, InvalidHeaderName> {
        Self::new(&config.header, StaticApiKey::new(config.key.clone()))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Check the credential header.
    ///
    /// An absent or empty header is `MissingKey`; anything else that the
    /// verifier refuses, including values that are not valid UTF-8, is
    /// `InvalidKey`.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = match headers.get(&self.header) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(AuthError::MissingKey),
        };

        match value.to_str() {
            Ok(presented) if self.verifier.verify(presented) => Ok(()),
            _ => Err(AuthError::InvalidKey),
        }
    }
}

/// API key authentication middleware.
///
/// Rejections go through [`AppError`] so they render as the standard error
/// envelope.
///
/// # Example
///
/// ```ignore
/// let auth = ApiKeyAuth::new("x-api-key", StaticApiKey::new("secret"))?;
///
/// let protected_routes = Router::new()
///     .route("/products", get(list_products))
///     .layer(axum::middleware::from_fn_with_state(auth, api_key_middleware));
/// ```
pub async fn api_key_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = auth.check(request.headers()) {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            "API key rejected: {}",
            e
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
