//! Drives the full router without a database: every case here is decided by
//! the access gate or by request validation before any query runs.

use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::router;
use crate::models::Role;
use crate::test_support::{bearer, test_state};

fn app() -> Router {
    router(test_state())
}

fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn future_booking() -> Value {
    json!({
        "field_id": 1,
        "booking_date": "2999-01-01",
        "start_time": "10:00",
        "end_time": "12:00"
    })
}

#[rstest]
#[tokio::test]
async fn health_reports_alive() {
    let (status, body) = send(request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK, I'm alive!");
}

#[rstest]
#[case(Method::POST, "/bookings")]
#[case(Method::POST, "/payments")]
#[case(Method::POST, "/fields")]
#[case(Method::PUT, "/fields/1")]
#[case(Method::DELETE, "/fields/1")]
#[tokio::test]
async fn protected_routes_require_a_token(#[case] method: Method, #[case] uri: &str) {
    let (status, body) = send(request(method, uri, None, Some(json!({})))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[rstest]
#[case("Bearer not-a-token")]
#[case("bearer-without-space")]
#[case("Basic Zm9vOmJhcg==")]
#[tokio::test]
async fn garbled_token_is_unauthorized(#[case] auth: &str) {
    let (status, _) = send(request(
        Method::POST,
        "/bookings",
        Some(auth),
        Some(future_booking()),
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[tokio::test]
async fn user_cannot_create_fields() {
    let token = bearer(5, Role::User);
    let body = json!({ "name": "Court 1", "price_per_hour": 100, "location": "North" });
    let (status, body) = send(request(Method::POST, "/fields", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "access forbidden - admin role required");
}

#[rstest]
#[case(Method::PUT, "/fields/3")]
#[case(Method::DELETE, "/fields/3")]
#[tokio::test]
async fn user_cannot_change_fields(#[case] method: Method, #[case] uri: &str) {
    let token = bearer(5, Role::User);
    let body = json!({ "name": "Court 1", "price_per_hour": 100, "location": "North" });
    let (status, _) = send(request(method, uri, Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[tokio::test]
async fn admin_passes_gate_and_hits_validation() {
    let token = bearer(1, Role::Admin);
    let body = json!({ "name": "Court 1", "price_per_hour": 0, "location": "North" });
    let (status, body) = send(request(Method::POST, "/fields", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Price per hour must be greater than 0");
}

#[rstest]
#[tokio::test]
async fn non_numeric_field_id_is_rejected() {
    let token = bearer(1, Role::Admin);
    let body = json!({ "name": "Court 1", "price_per_hour": 10, "location": "North" });
    let (status, body) = send(request(Method::PUT, "/fields/abc", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid field ID");
}

#[rstest]
#[case(json!({ "field_id": 1, "booking_date": "2000-01-01", "start_time": "10:00", "end_time": "11:00" }), "Cannot book in the past")]
#[case(json!({ "field_id": 1, "booking_date": "2999-01-01", "start_time": "10:00", "end_time": "10:00" }), "End time must be after start time")]
#[case(json!({ "booking_date": "2999-01-01", "start_time": "10:00", "end_time": "11:00" }), "Invalid field ID")]
#[case(json!({ "field_id": 1, "booking_date": "01-01-2999", "start_time": "10:00", "end_time": "11:00" }), "Invalid booking date format. Use YYYY-MM-DD")]
#[tokio::test]
async fn invalid_bookings_are_rejected_before_lookup(#[case] body: Value, #[case] message: &str) {
    let token = bearer(5, Role::User);
    let (status, body) = send(request(Method::POST, "/bookings", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], message);
}

#[rstest]
#[tokio::test]
async fn admin_may_book_like_a_user() {
    let token = bearer(1, Role::Admin);
    let body = json!({ "field_id": 1, "booking_date": "2000-01-01", "start_time": "10:00", "end_time": "11:00" });
    let (status, _) = send(request(Method::POST, "/bookings", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test]
async fn malformed_json_gets_json_error() {
    let token = bearer(5, Role::User);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/bookings")
        .header(AUTHORIZATION, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[rstest]
#[case(0)]
#[case(-1)]
#[tokio::test]
async fn payment_needs_positive_booking_id(#[case] booking_id: i32) {
    let token = bearer(5, Role::User);
    let body = json!({ "booking_id": booking_id });
    let (status, body) = send(request(Method::POST, "/payments", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid booking ID");
}

#[rstest]
#[tokio::test]
async fn short_password_fails_registration() {
    let body = json!({ "username": "rina", "email": "rina@example.com", "password": "123" });
    let (status, body) = send(request(Method::POST, "/auth/register", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters");
}

#[rstest]
#[tokio::test]
async fn openapi_document_lists_routes() {
    let (status, body) = send(request(Method::GET, "/api-docs/openapi.json", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/auth/register", "/auth/login", "/fields", "/fields/{id}", "/bookings", "/payments"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(body["components"]["securitySchemes"]["bearerAuth"].is_object());
}
