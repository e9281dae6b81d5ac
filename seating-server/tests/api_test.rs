//! HTTP API 测试 - 通过 oneshot 直接调用路由，无需监听端口

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use seating_server::api::build_app;
use seating_server::{Config, SeatingManager, SeatingStorage, ServerState};

fn create_test_app() -> Router {
    let storage = SeatingStorage::open_in_memory().unwrap();
    let config = Config::with_overrides(std::env::temp_dir().to_string_lossy(), 0);
    let state = ServerState::new(config, Arc::new(SeatingManager::new(storage)));
    build_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn test_table_endpoints() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 10}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["number"], 1);
    assert_eq!(body["allocated"], 0);

    let (status, _) = send(
        &app,
        "POST",
        "/api/party_tables",
        Some(json!({"number": 5, "capacity": 8})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/api/party_tables", None).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 5]);

    let (_, body) = send(&app, "GET", "/api/party_tables/seats_empty", None).await;
    assert_eq!(body, json!({"seats_empty": 18}));

    let (status, body) = send(&app, "DELETE", "/api/party_tables/5", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "DELETE", "/api/party_tables/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
}

#[tokio::test]
async fn test_table_validation_errors() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/api/party_tables", Some(json!({"number": 2}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);

    let (status, _) = send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/api/party_tables", Some(json!({"number": 2, "capacity": 4}))).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/party_tables",
        Some(json!({"number": 2, "capacity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7002);
}

#[tokio::test]
async fn test_guest_flow() {
    let app = create_test_app();
    send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 10}))).await;
    send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 8}))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "Betty", "table": 1, "accompanying_guests": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["table_number"], 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "Mickey", "accompanying_guests": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["table_number"], 1);

    let (_, body) = send(&app, "GET", "/api/party_tables/seats_empty", None).await;
    assert_eq!(body["seats_empty"], 13);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/guest_list/arrive",
        Some(json!({"name": "Betty", "accompanying_guests": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["time_arrived"].is_i64());

    let (_, body) = send(&app, "GET", "/api/guest_list/arrived", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Betty");

    let (status, body) = send(&app, "PUT", "/api/guest_list/Mickey/name?new_name=Minnie", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Minnie");

    let (status, _) = send(&app, "GET", "/api/guest_list/Mickey", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/party_tables/guests_at_table", None).await;
    assert_eq!(
        body,
        json!([
            {"table_number": 1, "guests": ["Betty", "Minnie"]},
            {"table_number": 2, "guests": []}
        ])
    );

    let (status, body) = send(&app, "PATCH", "/api/guest_list/Betty/leave", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["time_left"].is_i64());

    let (_, body) = send(&app, "GET", "/api/party_tables/guests_at_table/1", None).await;
    assert_eq!(body, json!({"table_number": 1, "guests": ["Minnie"]}));

    let (status, _) = send(&app, "DELETE", "/api/guest_list/Minnie", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/party_tables/seats_empty", None).await;
    assert_eq!(body["seats_empty"], 18);

    let (_, body) = send(&app, "GET", "/api/guest_list", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_guest_error_statuses() {
    let app = create_test_app();
    send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 2}))).await;

    // Invalid name
    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "B3tty", "table": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8005);
    assert_eq!(body["details"]["field"], "name");

    // No room
    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "Betty", "table": 1, "accompanying_guests": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7004);

    // Unknown guest
    let (status, body) = send(&app, "PATCH", "/api/guest_list/Donald/leave", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);

    // Departure before arrival
    send(&app, "POST", "/api/guest_list", Some(json!({"name": "Betty", "table": 1}))).await;
    let (status, body) = send(&app, "PATCH", "/api/guest_list/Betty/leave", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8004);

    // Table in use
    let (status, body) = send(&app, "DELETE", "/api/party_tables/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7003);

    // Unknown table
    let (status, _) = send(&app, "GET", "/api/party_tables/guests_at_table/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_malformed_requests_return_api_response() {
    let app = create_test_app();
    send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 4}))).await;

    // Non-numeric table number
    let (status, body) = send(&app, "DELETE", "/api/party_tables/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);

    // Broken JSON
    let (status, body) = send_raw(&app, "POST", "/api/guest_list", r#"{"name": "Betty""#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);

    // Wrong field type
    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "Betty", "accompanying_guests": "two"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);

    // Rename without new_name
    send(&app, "POST", "/api/guest_list", Some(json!({"name": "Betty"}))).await;
    let (status, body) = send(&app, "PUT", "/api/guest_list/Betty/name", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_oversized_party_is_rejected() {
    let app = create_test_app();
    send(&app, "POST", "/api/party_tables", Some(json!({"capacity": 4}))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/guest_list",
        Some(json!({"name": "Betty", "accompanying_guests": i32::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    send(&app, "POST", "/api/guest_list", Some(json!({"name": "Mickey"}))).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/api/guest_list/arrive",
        Some(json!({"name": "Mickey", "accompanying_guests": i32::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (_, body) = send(&app, "GET", "/api/party_tables", None).await;
    assert_eq!(body[0]["allocated"], 1);
}
