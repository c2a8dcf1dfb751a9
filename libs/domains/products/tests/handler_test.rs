//! Handler tests for Products domain
//!
//! These exercise the products router alone against the seeded in-memory
//! store: request parsing, status codes, response bodies and error envelopes.
//! Authentication and the application-wide fallbacks are covered by the app.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::ErrorResponse;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::seeded()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn new_product() -> Value {
    json!({
        "name": "Desk Fan",
        "description": "Quiet three-speed fan",
        "price": 0,
        "category": "Home",
        "inStock": false
    })
}

#[tokio::test]
async fn test_list_uses_default_paging() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: ProductPage = json_body(response.into_body()).await;
    assert_eq!(page.total_items, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.products.len(), 3);
}

#[tokio::test]
async fn test_list_second_page() {
    let response = app().oneshot(get("/?page=2&limit=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: ProductPage = json_body(response.into_body()).await;
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].name, "Coffee Maker");
}

#[tokio::test]
async fn test_list_body_uses_camel_case_keys() {
    let response = app().oneshot(get("/?limit=1")).await.unwrap();
    let body: Value = json_body(response.into_body()).await;

    assert_eq!(body["totalItems"], 3);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["products"][0]["inStock"], true);
    assert_eq!(body["products"][0]["price"], 1200);
}

#[tokio::test]
async fn test_list_category_filter_is_case_insensitive() {
    let response = app().oneshot(get("/?category=ELECTRONICS")).await.unwrap();
    let page: ProductPage = json_body(response.into_body()).await;

    assert_eq!(page.total_items, 2);
    assert!(page.products.iter().all(|p| p.category == "electronics"));
}

#[tokio::test]
async fn test_list_unknown_category_is_empty() {
    let response = app().oneshot(get("/?category=garden")).await.unwrap();
    let page: ProductPage = json_body(response.into_body()).await;

    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.products.is_empty());
}

#[tokio::test]
async fn test_list_rejects_zero_page() {
    let response = app().oneshot(get("/?page=0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
    assert!(body.details.is_some());
}

#[tokio::test]
async fn test_list_rejects_non_numeric_limit() {
    let response = app().oneshot(get("/?limit=ten")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "INVALID_QUERY");
    assert_eq!(body.status_code, 400);
}

#[tokio::test]
async fn test_search_finds_coffee_maker() {
    let response = app().oneshot(get("/search?name=coffee")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let results: SearchResults = json_body(response.into_body()).await;
    assert_eq!(results.total_results, 1);
    assert_eq!(results.products[0].id, "3");
}

#[tokio::test]
async fn test_search_without_name_is_400() {
    for uri in ["/search", "/search?name="] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.message, "Query parameter \"name\" is required");
    }
}

#[tokio::test]
async fn test_stats_on_seed_data() {
    let response = app().oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "totalProducts": 3,
            "countByCategory": { "electronics": 2, "kitchen": 1 }
        })
    );
}

#[tokio::test]
async fn test_get_product_by_id() {
    let response = app().oneshot(get("/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "Smartphone");
}

#[tokio::test]
async fn test_get_unknown_product_is_404() {
    let response = app().oneshot(get("/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product with ID 999 not found");
    assert_eq!(body.status_code, 404);
    assert_eq!(body.error, "NOT_FOUND");
}

#[tokio::test]
async fn test_create_accepts_zero_price_and_out_of_stock() {
    let response = app()
        .oneshot(send_json("POST", "/", new_product()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], "4");
    assert_eq!(body["price"], 0);
    assert_eq!(body["inStock"], false);
}

#[tokio::test]
async fn test_create_missing_name_is_400() {
    let mut payload = new_product();
    payload.as_object_mut().unwrap().remove("name");

    let response = app()
        .oneshot(send_json("POST", "/", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Name is required and must be a string");
}

#[tokio::test]
async fn test_create_string_price_is_400() {
    let mut payload = new_product();
    payload["price"] = json!("12.50");

    let response = app()
        .oneshot(send_json("POST", "/", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Price is required and must be a number");
}

#[tokio::test]
async fn test_create_rejects_array_bodies() {
    let bodies = [json!(["Desk Fan", "Quiet three-speed fan", 0, "Home", false]), json!([])];

    for payload in bodies {
        let response = app()
            .oneshot(send_json("POST", "/", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");

        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.message, "Name is required and must be a string");
        assert_eq!(body.error, "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_update_rejects_array_body() {
    let app = app();
    let payload = json!(["Desk Fan", "Quiet three-speed fan", 0, "Home", false]);

    let response = app
        .clone()
        .oneshot(send_json("PUT", "/1", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/1")).await.unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored.name, "Laptop");
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_without_content_type_is_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(new_product().to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_update_replaces_product() {
    let app = app();
    let response = app
        .clone()
        .oneshot(send_json("PUT", "/1", new_product()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.id, "1");
    assert_eq!(updated.name, "Desk Fan");

    let response = app.oneshot(get("/1")).await.unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_unknown_product_is_404() {
    let response = app()
        .oneshot(send_json("PUT", "/999", new_product()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_payload_wins_over_unknown_id() {
    let response = app()
        .oneshot(send_json("PUT", "/999", json!({ "name": "Only a name" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Description is required and must be a string");
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();

    let response = app.clone().oneshot(delete("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.into_body().collect().await.unwrap().to_bytes().is_empty());

    let response = app.clone().oneshot(get("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_created_ids_are_unique_after_delete() {
    let app = app();

    app.clone().oneshot(delete("/3")).await.unwrap();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(send_json("POST", "/", new_product()))
            .await
            .unwrap();
        let product: Product = json_body(response.into_body()).await;
        ids.push(product.id);
    }

    assert_eq!(ids, ["4", "5"]);
}

#[tokio::test]
async fn test_forced_error_route() {
    let response = app().oneshot(get("/error")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "This is a forced error");
    assert_eq!(body.status_code, 400);
}

#[tokio::test]
async fn test_async_error_route() {
    let response = app().oneshot(get("/async-error")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product not found");
}
