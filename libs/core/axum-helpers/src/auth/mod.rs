//! Authentication module.
//!
//! This module provides:
//! - Shared-secret API key verification behind a pluggable [`ApiKeyVerifier`]
//! - A middleware gate that rejects requests before they reach handlers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{api_key_middleware, ApiKeyAuth};
//! use core_config::{auth::ApiKeyConfig, FromEnv};
//!
//! let auth = ApiKeyAuth::from_config(&ApiKeyConfig::from_env()?)?;
//!
//! let protected = Router::new()
//!     .route("/products", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, api_key_middleware));
//! ```

pub mod api_key;

pub use api_key::{ApiKeyAuth, ApiKeyVerifier, AuthError, StaticApiKey, api_key_middleware};
