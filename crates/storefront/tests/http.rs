mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use common::*;
use serde_json::{Value, json};
use storefront::{di::RepositoryDeps, handler::AppRouter, repository::MemoryStore, state::AppState};
use tower::ServiceExt;

fn app(store: &MemoryStore) -> Router {
    AppRouter::build(AppState::new(
        RepositoryDeps::memory(store.clone()),
        LEDGER_TIMEOUT,
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn booking_body(event_id: i32, num_people: i32) -> Value {
    json!({
        "eventId": event_id,
        "name": "Grace",
        "email": "grace@example.com",
        "phone": "555-0199",
        "numPeople": num_people,
    })
}

#[tokio::test]
async fn event_lifecycle_over_http() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({
            "title": "Glaze lab",
            "description": "Mix your own glazes",
            "date": "2025-09-20",
            "time": "10:00",
            "maxPeople": 3,
            "price": 2500,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["bookedCount"], 0);
    let event_id = body["data"]["id"].as_i64().unwrap() as i32;

    let (status, body) = send(&app, "POST", "/api/bookings", Some(booking_body(event_id, 2))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, body) = send(&app, "POST", "/api/bookings", Some(booking_body(event_id, 2))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["details"]["reason"], "capacity_exceeded");
    assert_eq!(body["details"]["remaining"], 1);

    let (status, body) = send(&app, "GET", &format!("/api/events/{event_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["remaining"], 1);

    let (status, body) = send(&app, "GET", &format!("/api/events/{event_id}/bookings"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn booking_errors_map_to_status_codes() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 5, 0).await;
    let app = app(&store);

    let (status, _) = send(&app, "POST", "/api/bookings", Some(booking_body(999, 1))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut invalid = booking_body(event.event_id, 1);
    invalid["email"] = json!("nope");
    let (status, body) = send(&app, "POST", "/api/bookings", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (status, _) = send(&app, "POST", "/api/bookings", Some(json!({ "eventId": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(booked_count(&store, event.event_id).await, 0);
}

#[tokio::test]
async fn order_over_http_reports_shortfall() {
    let store = MemoryStore::new();
    let jug = seed_product(&store, "Jug", 1800, 5).await;
    let platter = seed_product(&store, "Platter", 5400, 1).await;
    let app = app(&store);

    let order = |items: Value| {
        json!({
            "items": items,
            "customerName": "Ada",
            "customerEmail": "ada@example.com",
            "customerPhone": "555-0101",
            "deliveryMethod": "delivery",
            "address": "1 Harbour Rd",
            "paymentMethod": "card",
        })
    };

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order(json!([
            { "productId": jug.product_id, "quantity": 3 },
            { "productId": platter.product_id, "quantity": 2 },
        ]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["reason"], "insufficient_stock");
    assert_eq!(body["details"]["shortfall"], 1);
    assert_eq!(stock(&store, jug.product_id).await, 5);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(order(json!([{ "productId": jug.product_id, "quantity": 2 }]))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total"], 3600);
    assert_eq!(body["data"]["items"][0]["productName"], "Jug");
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paymentStatus"], "pending");

    let (status, _) = send(&app, "GET", "/api/orders/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", &format!("/api/products/{}", jug.product_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 3);
}

#[tokio::test]
async fn delivery_without_address_is_a_bad_request() {
    let store = MemoryStore::new();
    let jug = seed_product(&store, "Jug", 1800, 5).await;
    let app = app(&store);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{ "productId": jug.product_id, "quantity": 1 }],
            "customerName": "Ada",
            "customerEmail": "ada@example.com",
            "customerPhone": "555-0101",
            "deliveryMethod": "delivery",
            "paymentMethod": "card",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Address is required"));
    assert_eq!(stock(&store, jug.product_id).await, 5);
}

#[tokio::test]
async fn metrics_endpoint_exposes_service_counters() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, _) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("product_query_service_request_counter"));
}
