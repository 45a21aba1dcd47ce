//! End-to-end API tests
//!
//! Drives the full middleware-wrapped router in-process through the
//! oneshot extension, covering the order placement / reservation cycle,
//! the status machine, and referential integrity on product deletion.

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};

use store_server::api::{self, OneshotRouter};
use store_server::{Config, ServerState};

fn test_state() -> ServerState {
    ServerState::initialize(&Config::with_overrides(0, false))
}

async fn send(
    state: &ServerState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut router = api::build_app(state);
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(state, request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_product(state: &ServerState, name: &str, price: f64, stock: u32) -> u64 {
    let (status, body) = send(
        state,
        "POST",
        "/api/products",
        Some(json!({
            "name": name,
            "description": "integration test product",
            "unitPrice": price,
            "category": "default",
            "stockQuantity": stock,
            "minStockThreshold": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_u64().unwrap()
}

async fn stock_of(state: &ServerState, id: u64) -> u64 {
    let (status, body) = send(state, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    body["stockQuantity"].as_u64().unwrap()
}

fn order_body(product_id: u64, quantity: u32) -> Value {
    json!({
        "customerName": "Ana Silva",
        "customerEmail": "ana@example.com",
        "customerAddress": "Main st 1",
        "items": [{"productId": product_id, "quantity": quantity}]
    })
}

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let (status, body) = send(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_product_crud() {
    let state = test_state();
    let id = seed_product(&state, "beans", 12.5, 40).await;

    let (status, body) = send(&state, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "beans");
    assert_eq!(body["active"], true);
    assert!(body["createdAt"].is_string());

    // Partial patch
    let (status, body) = send(
        &state,
        "PATCH",
        &format!("/api/products/{id}"),
        Some(json!({"unitPrice": 13.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unitPrice"], 13.0);
    assert_eq!(body["name"], "beans");

    // Empty patch is rejected
    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/products/{id}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unreferenced product deletes cleanly
    let (status, _) = send(&state, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&state, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_validation_and_path_errors() {
    let state = test_state();

    // Three decimal places on money
    let (status, body) = send(
        &state,
        "POST",
        "/api/products",
        Some(json!({
            "name": "beans",
            "description": "x",
            "unitPrice": 12.345,
            "category": "coffee",
            "stockQuantity": 1,
            "minStockThreshold": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_u64().is_some());

    // Negative stock
    let (status, _) = send(
        &state,
        "POST",
        "/api/products",
        Some(json!({
            "name": "beans",
            "description": "x",
            "unitPrice": 1.0,
            "category": "coffee",
            "stockQuantity": -1,
            "minStockThreshold": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-numeric id
    let (status, _) = send(&state, "GET", "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown id
    let (status, _) = send(&state, "GET", "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_list_filters() {
    let state = test_state();
    seed_product(&state, "beans", 10.0, 40).await;
    let tea = seed_product(&state, "tea", 5.0, 1).await;
    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/products/{tea}"),
        Some(json!({"category": "tea", "active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, "GET", "/api/products?category=tea", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&state, "GET", "/api/products?active=true", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "beans");

    // tea has stock 1 with threshold 1
    let (_, body) = send(&state, "GET", "/api/products?lowStock=true", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "tea");
}

#[tokio::test]
async fn test_reservation_exhaust_cancel_retry() {
    let state = test_state();
    let pid = seed_product(&state, "limited", 10.0, 1).await;

    // Order A takes the last unit
    let (status, order_a) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order_a["status"], "pending");
    assert_eq!(stock_of(&state, pid).await, 0);

    // Order B is rejected and changes nothing
    let (status, _) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(stock_of(&state, pid).await, 0);

    // Cancelling A releases the unit
    let order_a_id = order_a["id"].as_u64().unwrap();
    let (status, cancelled) = send(
        &state,
        "PATCH",
        &format!("/api/orders/{order_a_id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(stock_of(&state, pid).await, 1);

    // Retry of B now succeeds
    let (status, _) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_discount_over_subtotal_rejected_before_mutation() {
    let state = test_state();
    let pid = seed_product(&state, "pricey", 650.0, 5).await;

    let mut body = order_body(pid, 1);
    body["discount"] = json!(700.0);
    let (status, _) = send(&state, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(stock_of(&state, pid).await, 5);
}

#[tokio::test]
async fn test_multi_line_all_or_nothing() {
    let state = test_state();
    let a = seed_product(&state, "plenty", 5.0, 5).await;
    let b = seed_product(&state, "scarce", 5.0, 1).await;

    let body = json!({
        "customerName": "Ana Silva",
        "customerEmail": "ana@example.com",
        "customerAddress": "Main st 1",
        "items": [
            {"productId": a, "quantity": 2},
            {"productId": b, "quantity": 3}
        ]
    });
    let (status, _) = send(&state, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(stock_of(&state, a).await, 5);
    assert_eq!(stock_of(&state, b).await, 1);
}

#[tokio::test]
async fn test_order_missing_and_inactive_product() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;

    let (status, _) = send(&state, "POST", "/api/orders", Some(order_body(999, 1))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/products/{pid}"),
        Some(json!({"active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(stock_of(&state, pid).await, 5);
}

#[tokio::test]
async fn test_mistyped_body_fields_are_bad_request() {
    let state = test_state();

    // String where a number belongs
    let (status, body) = send(
        &state,
        "POST",
        "/api/products",
        Some(json!({
            "name": "beans",
            "description": "x",
            "unitPrice": 1.0,
            "category": "coffee",
            "stockQuantity": "ten",
            "minStockThreshold": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_u64().is_some());

    let pid = seed_product(&state, "beans", 10.0, 5).await;
    let mut order = order_body(pid, 1);
    order["discount"] = json!("big");
    let (status, _) = send(&state, "POST", "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Syntactically broken JSON
    let mut router = api::build_app(&state);
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(&state, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was created or reserved along the way
    assert_eq!(stock_of(&state, pid).await, 5);
    let (_, products) = send(&state, "GET", "/api/products", None).await;
    assert_eq!(products.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_payload_validation() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;

    // Bad email
    let mut body = order_body(pid, 1);
    body["customerEmail"] = json!("not-an-email");
    let (status, _) = send(&state, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let (status, _) = send(&state, "POST", "/api/orders", Some(order_body(pid, 0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No items
    let mut body = order_body(pid, 1);
    body["items"] = json!([]);
    let (status, _) = send(&state, "POST", "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was reserved along the way
    assert_eq!(stock_of(&state, pid).await, 5);
}

#[tokio::test]
async fn test_status_transitions() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    let oid = order["id"].as_u64().unwrap();
    let status_uri = format!("/api/orders/{oid}/status");

    // Skipping ahead is a 400
    let (status, _) = send(&state, "PATCH", &status_uri, Some(json!({"status": "shipped"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status is a 400, not a 422
    let (status, _) = send(&state, "PATCH", &status_uri, Some(json!({"status": "paid"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The forward chain succeeds step by step
    for next in ["confirmed", "shipped", "delivered"] {
        let (status, body) =
            send(&state, "PATCH", &status_uri, Some(json!({"status": next}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    // Delivered is terminal: status change and cancel both conflict
    let (status, _) = send(&state, "PATCH", &status_uri, Some(json!({"status": "confirmed"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&state, "PATCH", &format!("/api/orders/{oid}/cancel"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Delivered orders never release stock
    assert_eq!(stock_of(&state, pid).await, 4);
}

#[tokio::test]
async fn test_cancelled_order_is_frozen() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 2))).await;
    let oid = order["id"].as_u64().unwrap();

    let (status, _) = send(&state, "PATCH", &format!("/api/orders/{oid}/cancel"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stock_of(&state, pid).await, 5);

    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/orders/{oid}/status"),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A second cancel conflicts and must not restore again
    let (status, _) = send(&state, "PATCH", &format!("/api/orders/{oid}/cancel"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(stock_of(&state, pid).await, 5);
}

#[tokio::test]
async fn test_snapshots_survive_product_edits() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 12.5, 10).await;
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 2))).await;
    let oid = order["id"].as_u64().unwrap();

    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/products/{pid}"),
        Some(json!({"name": "premium beans", "unitPrice": 99.99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send(&state, "GET", &format!("/api/orders/{oid}"), None).await;
    assert_eq!(fetched["lineItems"][0]["productNameSnapshot"], "beans");
    assert_eq!(fetched["lineItems"][0]["unitPriceSnapshot"], 12.5);
    assert_eq!(fetched["subtotal"], 25.0);
    assert_eq!(fetched["total"], 25.0);
}

#[tokio::test]
async fn test_delete_order_rules() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;

    // Pending order deletes and restores stock
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 2))).await;
    let oid = order["id"].as_u64().unwrap();
    assert_eq!(stock_of(&state, pid).await, 3);
    let (status, _) = send(&state, "DELETE", &format!("/api/orders/{oid}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(stock_of(&state, pid).await, 5);
    let (status, _) = send(&state, "GET", &format!("/api/orders/{oid}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Confirmed order refuses deletion
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    let oid = order["id"].as_u64().unwrap();
    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/orders/{oid}/status"),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&state, "DELETE", &format!("/api/orders/{oid}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unknown order
    let (status, _) = send(&state, "DELETE", "/api/orders/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_delete_referential_integrity() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 5).await;
    let (_, order) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    let oid = order["id"].as_u64().unwrap();

    // Referenced by a pending order
    let (status, _) = send(&state, "DELETE", &format!("/api/products/{pid}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // After cancellation the delete goes through
    let (status, _) = send(&state, "PATCH", &format!("/api/orders/{oid}/cancel"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&state, "DELETE", &format!("/api/products/{pid}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_order_list_filters() {
    let state = test_state();
    let pid = seed_product(&state, "beans", 10.0, 10).await;

    let (_, a) = send(&state, "POST", "/api/orders", Some(order_body(pid, 1))).await;
    let mut body = order_body(pid, 1);
    body["customerEmail"] = json!("bob@example.com");
    let (_, _b) = send(&state, "POST", "/api/orders", Some(body)).await;

    let a_id = a["id"].as_u64().unwrap();
    let (status, _) = send(
        &state,
        "PATCH",
        &format!("/api/orders/{a_id}/status"),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, confirmed) = send(&state, "GET", "/api/orders?status=confirmed", None).await;
    assert_eq!(confirmed.as_array().unwrap().len(), 1);
    assert_eq!(confirmed[0]["id"], a_id);

    let (_, by_email) = send(
        &state,
        "GET",
        "/api/orders?customerEmail=bob@example.com",
        None,
    )
    .await;
    assert_eq!(by_email.as_array().unwrap().len(), 1);
    assert_eq!(by_email[0]["customerEmail"], "bob@example.com");

    let (_, all) = send(&state, "GET", "/api/orders", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}
