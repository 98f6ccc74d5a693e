#![allow(clippy::unwrap_used)]
// Integration tests for `HttpTransport` using wiremock.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wireflow_transport::{HttpTransport, Transport, TransportRequest};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HttpTransport) {
    let server = MockServer::start().await;
    let transport = HttpTransport::with_client(reqwest::Client::new());
    (server, transport)
}

fn get(url: String) -> TransportRequest {
    TransportRequest {
        method: "GET".into(),
        url,
        headers: HashMap::new(),
        body: None,
    }
}

// ── Success mapping ─────────────────────────────────────────────────

#[tokio::test]
async fn dispatch_maps_status_and_json_body() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "abc123")
                .set_body_json(json!([{ "name": "ada" }])),
        )
        .mount(&server)
        .await;

    let response = transport
        .dispatch(get(format!("{}/api/users", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_text, "OK");
    assert_eq!(response.body, Some(json!([{ "name": "ada" }])));
    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("abc123"));
}

#[tokio::test]
async fn dispatch_sends_method_headers_and_body() {
    let (server, transport) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(header("x-api-key", "secret"))
        .and(body_json(json!({ "name": "grace" })))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let request = TransportRequest {
        method: "POST".into(),
        url: format!("{}/api/users", server.uri()),
        headers: HashMap::from([("x-api-key".to_owned(), "secret".to_owned())]),
        body: Some(json!({ "name": "grace" })),
    };

    let response = transport.dispatch(request).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.status_text, "Created");
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn dispatch_falls_back_to_string_body() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let response = transport
        .dispatch(get(format!("{}/api/health", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.body, Some(json!("not json at all")));
}

// ── Failure mapping ─────────────────────────────────────────────────

#[tokio::test]
async fn non_2xx_status_rejects_with_status() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = transport
        .dispatch(get(format!("{}/api/missing", server.uri())))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn unreachable_server_rejects_without_status() {
    let (server, transport) = setup().await;
    let uri = server.uri();
    drop(server);

    let err = transport
        .dispatch(get(format!("{uri}/api/users")))
        .await
        .unwrap_err();

    assert_eq!(err.status(), None);
    assert!(err.is_connect() || err.is_timeout());
}

#[tokio::test]
async fn invalid_method_rejects_before_any_io() {
    let (server, transport) = setup().await;

    let request = TransportRequest {
        method: "NOT A METHOD".into(),
        url: format!("{}/api/users", server.uri()),
        headers: HashMap::new(),
        body: None,
    };

    let err = transport.dispatch(request).await.unwrap_err();

    assert_eq!(err.status(), None);
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
