//! Products API routes

use axum::{middleware, Router};
use axum_helpers::{
    api_key_middleware,
    errors::handlers::{method_not_allowed, not_found},
};
use domain_products::{handlers, ProductService};

use crate::state::AppState;

/// Create products router
///
/// Every request under this router, matched or not, passes the API key gate
/// first.
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(state.products.clone());

    handlers::router(service)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            api_key_middleware,
        ))
}
