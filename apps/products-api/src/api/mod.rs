//! API routes module

pub mod products;

use axum::{routing::get, Router};
use axum_helpers::{create_router, health_router};
use tower_http::cors::CorsLayer;

use crate::openapi::api_doc;
use crate::state::AppState;

/// Create all API routes, mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Unauthenticated routes served at the root
pub fn public_routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .merge(health_router(state.config.app))
}

/// The complete application router
pub fn app(state: &AppState, cors: Option<CorsLayer>) -> Router {
    create_router(
        routes(state),
        public_routes(state),
        api_doc(state.auth.header().as_str()),
        cors,
    )
}

async fn hello() -> &'static str {
    "Hello World"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::ErrorResponse;
    use core_config::{app_info, auth::ApiKeyConfig, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "test-key";

    fn app_with_key(api_key: ApiKeyConfig) -> Router {
        let config = Config {
            app: app_info!(),
            server: ServerConfig::default(),
            api_key,
            environment: Environment::Development,
        };
        let state = AppState::new(config).unwrap();
        app(&state, None)
    }

    fn test_app() -> Router {
        app_with_key(ApiKeyConfig::new(KEY))
    }

    fn request(method: &str, uri: &str, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn envelope(response: axum::response::Response) -> ErrorResponse {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_hello_world_needs_no_key() {
        let response = test_app().oneshot(request("GET", "/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"Hello World");
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let response = test_app()
            .oneshot(request("GET", "/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_is_401() {
        let response = test_app()
            .oneshot(request("GET", "/api/products", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = envelope(response).await;
        assert_eq!(body.message, "API key is missing");
        assert_eq!(body.status_code, 401);
    }

    #[tokio::test]
    async fn test_wrong_key_is_403() {
        let response = test_app()
            .oneshot(request("GET", "/api/products", Some("nope")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = envelope(response).await;
        assert_eq!(body.message, "Invalid API key");
        assert_eq!(body.status_code, 403);
    }

    #[tokio::test]
    async fn test_correct_key_lists_products() {
        let response = test_app()
            .oneshot(request("GET", "/api/products", Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["totalItems"], 3);
    }

    #[tokio::test]
    async fn test_auth_runs_before_routing() {
        let response = test_app()
            .oneshot(request("GET", "/api/products/1/extra", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unmatched_product_path_is_404_with_full_path() {
        let response = test_app()
            .oneshot(request("GET", "/api/products/1/extra", Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            envelope(response).await.message,
            "Not Found - /api/products/1/extra"
        );
    }

    #[tokio::test]
    async fn test_unknown_root_path_is_404() {
        let response = test_app()
            .oneshot(request("GET", "/does-not-exist", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            envelope(response).await.message,
            "Not Found - /does-not-exist"
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let response = test_app()
            .oneshot(request("PATCH", "/api/products/1", Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(envelope(response).await.status_code, 405);
    }

    #[tokio::test]
    async fn test_store_is_shared_across_requests() {
        let app = test_app();
        let payload = json!({
            "name": "Toaster",
            "description": "Two-slot toaster",
            "price": 30,
            "category": "kitchen",
            "inStock": true
        });

        let create = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("x-api-key", KEY)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(request("GET", "/api/products/stats", Some(KEY)))
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["totalProducts"], 4);
        assert_eq!(body["countByCategory"]["kitchen"], 2);
    }

    #[tokio::test]
    async fn test_openapi_documents_product_routes() {
        let response = test_app()
            .oneshot(request("GET", "/api-docs/openapi.json", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(doc["paths"]["/api/products/{id}"].is_object());
        assert!(doc["components"]["securitySchemes"]["api_key"].is_object());
    }

    #[tokio::test]
    async fn test_openapi_advertises_configured_header() {
        let mut api_key = ApiKeyConfig::new(KEY);
        api_key.header = "x-service-key".to_string();

        let response = app_with_key(api_key)
            .oneshot(request("GET", "/api-docs/openapi.json", None))
            .await
            .unwrap();
        let doc: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();

        let scheme = &doc["components"]["securitySchemes"]["api_key"];
        assert_eq!(scheme["in"], "header");
        assert_eq!(scheme["name"], "x-service-key");
    }
}
