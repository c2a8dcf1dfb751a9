use axum::http::{HeaderName, HeaderValue, Method, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for the given origins.
///
/// # Arguments
/// * `allowed_origins` - Origins allowed to call the API; empty allows none
/// * `api_key_header` - Credential header browsers must be allowed to send
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The listed origins
/// - The methods the API serves (GET, POST, PUT, DELETE, OPTIONS)
/// - Content-Type, Accept and the API key header
/// - 1 hour max age
///
/// # Errors
/// Fails if an origin is not a valid header value.
pub fn create_cors_layer(
    allowed_origins: &[String],
    api_key_header: &HeaderName,
) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            api_key_header.clone(),
        ])
        .max_age(Duration::from_secs(3600)))
}
