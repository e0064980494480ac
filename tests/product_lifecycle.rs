//! Product Lifecycle Tests
//!
//! Create, update, and soft-delete products through the HTTP surface,
//! including the numeric field rules.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use tallybook::api::{router, AppState};

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    business: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-business-id", business);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn widget() -> Value {
    json!({
        "name": "Widget",
        "description": "A standard widget",
        "price": 9.99,
        "stock": 10,
        "category": "Hardware"
    })
}

#[tokio::test]
async fn test_create_update_and_soft_delete() {
    let app = router(AppState::in_memory());
    let business = Uuid::new_v4().to_string();

    let (status, created) = send(&app, "POST", "/api/products", &business, Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["price"], 9.99);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let mut updated = widget();
    updated["price"] = json!(12.5);
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        &business,
        Some(updated),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 12.5);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/products/{id}"),
        &business,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deactivated"], true);

    // Gone from the default listing, still fetchable by id.
    let (_, listed) = send(&app, "GET", "/api/products", &business, None).await;
    assert_eq!(listed["count"], 0);
    let (_, listed) = send(
        &app,
        "GET",
        "/api/products?includeInactive=true",
        &business,
        None,
    )
    .await;
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["isActive"], false);

    let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), &business, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);
}

#[tokio::test]
async fn test_numeric_rules_collected_together() {
    let app = router(AppState::in_memory());
    let business = Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        &business,
        Some(json!({
            "name": "Widget",
            "price": -1.0,
            "stock": 2.5,
            "category": "Hardware"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["price", "stock"]);
    let messages: Vec<&str> = errors
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.contains(&"Price must be a positive number"));
    assert!(messages.contains(&"Stock must be a non-negative integer"));
}

#[tokio::test]
async fn test_update_of_missing_product_is_not_found() {
    let app = router(AppState::in_memory());
    let business = Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{}", Uuid::new_v4()),
        &business,
        Some(widget()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Record not found");
}
