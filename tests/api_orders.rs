//! HTTP surface integration tests
//!
//! Drives the real router through `tower::ServiceExt::oneshot`, JWT
//! middleware included, against a tempfile-backed database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use wercha_api::api;
use wercha_api::auth::{JwtConfig, JwtService};
use wercha_api::core::{Config, ServerState};
use wercha_api::db::DbService;
use wercha_api::db::models::{Product, ProductCreate};
use wercha_api::db::repository::product;

const TEST_SECRET: &str = "api-test-secret";

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_minutes: 60,
        issuer: "wercha-api".to_string(),
        audience: "wercha-client".to_string(),
    }
}

async fn test_state(dir: &tempfile::TempDir) -> ServerState {
    let db_path = dir.path().join("api-test.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to open test database");

    let jwt = test_jwt_config();
    let config = Config {
        http_port: 0,
        db_path: db_path.to_string_lossy().into_owned(),
        log_level: "info".to_string(),
        log_dir: None,
        jwt: jwt.clone(),
    };

    ServerState {
        config,
        db,
        jwt_service: Arc::new(JwtService::with_config(jwt)),
    }
}

async fn test_app() -> (tempfile::TempDir, Router, ServerState) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let state = test_state(&dir).await;
    let app = api::build_app(state.clone());
    (dir, app, state)
}

fn token_for(state: &ServerState, user_id: &str) -> String {
    state
        .jwt_service
        .generate_token(user_id)
        .expect("Failed to mint test token")
}

async fn seed_product(state: &ServerState, title: &str, price: i64, stock: i64) -> Product {
    product::create(
        &state.db.pool,
        ProductCreate {
            title: title.to_string(),
            price,
            stock,
        },
    )
    .await
    .expect("Failed to seed product")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn body_json(response: http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

fn cart_body(product_id: i64, qty: i64) -> Value {
    json!({
        "items": [{ "product_id": product_id, "qty": qty }],
        "full_name": "Sara Ahmadi",
        "phone": "09123456789",
        "address": "12 Azadi Street, Unit 4",
        "city": "Tehran",
        "postal_code": "1234567890"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let (_dir, app, _state) = test_app().await;

    let response = app.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_checkout_requires_token() {
    let (_dir, app, _state) = test_app().await;

    let response = app
        .oneshot(post_json("/api/orders", None, cart_body(1, 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (_dir, app, _state) = test_app().await;

    let response = app
        .oneshot(post_json("/api/orders", Some("not.a.jwt"), cart_body(1, 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (_dir, app, _state) = test_app().await;

    let mut expired_config = test_jwt_config();
    expired_config.expiration_minutes = -5;
    let expired = JwtService::with_config(expired_config)
        .generate_token("user-1")
        .unwrap();

    let response = app
        .oneshot(post_json("/api/orders", Some(&expired), cart_body(1, 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E3003");
}

#[tokio::test]
async fn test_checkout_created_response_shape() {
    let (_dir, app, state) = test_app().await;
    let teapot = seed_product(&state, "Teapot", 1000, 5).await;
    let token = token_for(&state, "user-1");

    let response = app
        .oneshot(post_json("/api/orders", Some(&token), cart_body(teapot.id, 2)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["total_amount"], 2000);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_i64());
    assert_eq!(
        body["items"],
        json!([{
            "product_id": teapot.id,
            "title": "Teapot",
            "qty": 2,
            "unit_price": 1000,
            "subtotal": 2000
        }])
    );
}

#[tokio::test]
async fn test_checkout_field_error_shape() {
    let (_dir, app, state) = test_app().await;
    let token = token_for(&state, "user-1");

    let body = json!({
        "items": [{ "product_id": 1, "qty": 1 }],
        "full_name": "ab",
        "phone": "12345",
        "address": "12 Azadi Street, Unit 4",
        "city": "Tehran",
        "postal_code": "1234567890"
    });

    let response = app
        .oneshot(post_json("/api/orders", Some(&token), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Raw field map, no error-code envelope
    let body = body_json(response).await;
    assert_eq!(body["phone"], json!(["phone number is not valid (example: 09123456789)"]));
    assert_eq!(body["full_name"], json!(["full name must be at least 3 characters"]));
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn test_type_mismatched_body_reports_field_map() {
    let (_dir, app, state) = test_app().await;
    let token = token_for(&state, "user-1");

    let mut body = cart_body(1, 1);
    body["items"][0]["qty"] = json!("five");

    let response = app
        .oneshot(post_json("/api/orders", Some(&token), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["body"][0].is_string());
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn test_overflowing_qty_sum_is_a_field_error() {
    let (_dir, app, state) = test_app().await;
    let mug = seed_product(&state, "Mug", 300, 10).await;
    let token = token_for(&state, "user-1");

    let mut body = cart_body(mug.id, 1);
    body["items"] = json!([
        { "product_id": mug.id, "qty": i64::MAX },
        { "product_id": mug.id, "qty": 2 }
    ]);

    let response = app
        .oneshot(post_json("/api/orders", Some(&token), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["items"], json!(["qty is too large"]));
}

#[tokio::test]
async fn test_checkout_line_error_shape() {
    let (_dir, app, state) = test_app().await;
    let rug = seed_product(&state, "Rug", 7000, 2).await;
    let token = token_for(&state, "user-1");

    let response = app
        .oneshot(post_json("/api/orders", Some(&token), cart_body(rug.id, 5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "items": [{
                "product_id": rug.id,
                "title": "Rug",
                "available": 2,
                "detail": "insufficient stock"
            }]
        })
    );
}

#[tokio::test]
async fn test_last_address_none_then_most_recent() {
    let (_dir, app, state) = test_app().await;
    let plate = seed_product(&state, "Plate", 150, 20).await;
    let token = token_for(&state, "user-1");

    let response = app
        .clone()
        .oneshot(get("/api/orders/last-address", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(post_json("/api/orders", Some(&token), cart_body(plate.id, 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get("/api/orders/last-address", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["full_name"], "Sara Ahmadi");
    assert_eq!(body["city"], "Tehran");
    assert_eq!(body["postal_code"], "1234567890");
}

#[tokio::test]
async fn test_pay_is_not_repeatable() {
    let (_dir, app, state) = test_app().await;
    let book = seed_product(&state, "Notebook", 450, 6).await;
    let token = token_for(&state, "user-1");

    let response = app
        .clone()
        .oneshot(post_json("/api/orders", Some(&token), cart_body(book.id, 1)))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"]
        .as_str()
        .expect("order id")
        .to_string();

    let pay_uri = format!("/api/orders/{order_id}/pay");
    let response = app
        .clone()
        .oneshot(post_json(&pay_uri, Some(&token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "paid");

    let response = app
        .clone()
        .oneshot(post_json(&pay_uri, Some(&token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E0004");
    assert_eq!(body["detail"], "cannot pay an order that is paid");
}

#[tokio::test]
async fn test_paid_order_cannot_be_canceled() {
    let (_dir, app, state) = test_app().await;
    let lamp = seed_product(&state, "Desk Lamp", 800, 4).await;
    let token = token_for(&state, "user-1");

    let response = app
        .clone()
        .oneshot(post_json("/api/orders", Some(&token), cart_body(lamp.id, 1)))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"]
        .as_str()
        .expect("order id")
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/orders/{order_id}/pay"),
            Some(&token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            &format!("/api/orders/{order_id}/cancel"),
            Some(&token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["detail"],
        "cannot cancel an order that is paid"
    );
}

#[tokio::test]
async fn test_cancel_pending_order() {
    let (_dir, app, state) = test_app().await;
    let mug = seed_product(&state, "Mug", 300, 10).await;
    let token = token_for(&state, "user-1");

    let response = app
        .clone()
        .oneshot(post_json("/api/orders", Some(&token), cart_body(mug.id, 1)))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"]
        .as_str()
        .expect("order id")
        .to_string();

    let response = app
        .oneshot(post_json(
            &format!("/api/orders/{order_id}/cancel"),
            Some(&token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "canceled");
}

#[tokio::test]
async fn test_foreign_order_reads_as_missing() {
    let (_dir, app, state) = test_app().await;
    let chair = seed_product(&state, "Chair", 2500, 8).await;
    let owner = token_for(&state, "user-1");
    let stranger = token_for(&state, "user-2");

    let response = app
        .clone()
        .oneshot(post_json("/api/orders", Some(&owner), cart_body(chair.id, 1)))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"]
        .as_str()
        .expect("order id")
        .to_string();

    let response = app
        .oneshot(post_json(
            &format!("/api/orders/{order_id}/pay"),
            Some(&stranger),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "E0003");
}
