use atm_mapper_console::app::server::build_state;
use atm_mapper_console::{create_router, ConsoleApi, ConsoleConfig};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn config_for(base_url: &str) -> ConsoleConfig {
    let mut config = ConsoleConfig::default();
    config.upstream.base_url = base_url.to_string();
    config
}

fn router_for(config: &ConsoleConfig) -> Router {
    create_router(build_state(config).unwrap())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_clients_passes_through_body_and_status() {
    let server = MockServer::start_async().await;
    let upstream_body = json!({
        "success": true,
        "message": "OK",
        "data": [{"clientId": 1, "clientName": "North Bank", "isoVersion": "1987",
                  "encoding": "ASCII", "bitmapType": "HEX", "active": "Y"}]
    });

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/mapper/api/v1/clients")
                .header("content-type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(upstream_body.clone());
        })
        .await;

    let router = router_for(&config_for(&server.url("/mapper/api/v1")));
    let (status, headers, body) = send(router, get("/api/v1/clients")).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream_body);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_active_clients_route_is_not_treated_as_an_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients/active");
            then.status(200)
                .json_body(json!({"success": true, "message": "", "data": []}));
        })
        .await;

    let router = router_for(&config_for(&server.url("/api/v1")));
    let (status, _, body) = send(router, get("/api/v1/clients/active")).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_create_client_forwards_body_and_upstream_error_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/clients")
                .json_body(json!({"clientId": 5, "clientName": "Harbor"}));
            then.status(409)
                .json_body(json!({"success": false, "message": "Client already exists"}));
        })
        .await;

    let router = router_for(&config_for(&server.url("/api/v1")));
    let request = with_json(
        "POST",
        "/api/v1/clients",
        r#"{"clientId":5,"clientName":"Harbor"}"#,
    );
    let (status, _, body) = send(router, request).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Client already exists");
}

#[tokio::test]
async fn test_update_client_rejects_non_numeric_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let router = router_for(&config_for(&server.url("/api/v1")));
    let request = with_json("PUT", "/api/v1/clients/abc", r#"{"clientName":"x"}"#);
    let (status, headers, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Invalid clientId"}));
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_update_client_with_invalid_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let router = router_for(&config_for(&server.url("/api/v1")));
    let request = with_json("PUT", "/api/v1/clients/12", "{not json");
    let (status, _, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON body");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_delete_mapping_wraps_plain_text_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/mapper1/api/v1/mappings/88");
            then.status(200).body("Mapping deleted");
        })
        .await;

    let mut config = config_for("http://127.0.0.1:1/unused");
    config.upstream.mappings_base_url = Some(server.url("/mapper1/api/v1"));

    let router = router_for(&config);
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/mappings/88")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(router, request).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Mapping deleted"}));
}

#[tokio::test]
async fn test_mappings_for_client_passes_not_found_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/mappings/client/31");
            then.status(404)
                .json_body(json!({"success": false, "message": "Client not found"}));
        })
        .await;

    let router = router_for(&config_for(&server.url("/api/v1")));
    let (status, _, body) = send(router, get("/api/v1/mappings/client/31")).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client not found");
}

#[tokio::test]
async fn test_unreachable_upstream_returns_bad_gateway() {
    let router = router_for(&config_for("http://127.0.0.1:1/api/v1"));
    let (status, _, body) = send(router, get("/api/v1/standards")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = router_for(&ConsoleConfig::default());
    let (status, _, body) = send(router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_console_api_through_running_proxy() {
    let backend = MockServer::start_async().await;
    let mock = backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/standards");
            then.status(200).json_body(json!({
                "success": true,
                "message": "OK",
                "data": [
                    {"recId": 1, "fieldId": 2, "fieldLength": 19, "fieldName": "Primary Account Number"},
                    {"recId": 2, "fieldId": 3, "fieldLength": 6, "fieldName": "Processing Code"}
                ]
            }));
        })
        .await;

    let router = router_for(&config_for(&backend.url("/api/v1")));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let api = ConsoleApi::new(format!("http://{}/api/v1", addr)).unwrap();
    let standards = api.list_standards().await.unwrap();

    mock.assert_async().await;
    assert_eq!(standards.len(), 2);
    assert_eq!(standards[1].iso_field_name, "Processing Code");
    assert_eq!(standards[0].length, 19);
}
