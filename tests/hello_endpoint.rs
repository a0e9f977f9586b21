//! End-to-end tests against a live listener.

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use request_echo::EchoConfig;

mod common;

use common::{client, TestServer};

#[tokio::test]
async fn test_get_describes_request() {
    let server = TestServer::start(EchoConfig::default()).await;

    let res = client()
        .get(server.url("/api/py/hello?x=1"))
        .header("Accept", "application/json")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Hello from FastAPI");
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/api/py/hello");
    assert_eq!(body["query_params"], json!({"x": "1"}));
    assert_eq!(body["headers"]["accept"], "application/json");
    assert_eq!(body["headers"]["host"], server.addr.to_string());
    assert_eq!(body["url"], format!("http://{}/api/py/hello?x=1", server.addr));
    assert!(body.get("body").is_none(), "GET must not carry a body key");
}

#[tokio::test]
async fn test_get_reports_connected_peer() {
    let server = TestServer::start(EchoConfig::default()).await;

    let body: Value = client()
        .get(server.url("/api/py/hello"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["client"]["host"], "127.0.0.1");
    assert!(body["client"]["port"].as_u64().is_some_and(|port| port > 0));
}

#[tokio::test]
async fn test_url_without_host_header_uses_server_socket() {
    let server = TestServer::start(EchoConfig::default()).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"GET /api/py/hello?q=1 HTTP/1.0\r\n\r\n")
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let raw = String::from_utf8(raw).unwrap();
    let (head, payload) = raw.split_once("\r\n\r\n").expect("complete HTTP response");
    assert_eq!(head.split_whitespace().nth(1), Some("200"), "unexpected response: {head}");

    let body: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(body["headers"], json!({}));
    assert_eq!(body["url"], format!("http://{}/api/py/hello?q=1", server.addr));
}

#[tokio::test]
async fn test_post_json_body() {
    let server = TestServer::start(EchoConfig::default()).await;

    let res = client()
        .post(server.url("/api/py/hello"))
        .header("Content-Type", "application/json")
        .body(r#"{"n":5}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["body"], json!({"n": 5}));
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn test_post_body_variants() {
    let server = TestServer::start(EchoConfig::default()).await;
    let client = client();

    let cases: Vec<(&[u8], Value)> = vec![
        (&b"42"[..], json!(42)),
        (&b"hello world"[..], json!("hello world")),
        (&b"[1, \"two\"]"[..], json!([1, "two"])),
        (&b""[..], Value::Null),
        (&b"\xff\xfeok"[..], json!("\u{FFFD}\u{FFFD}ok")),
    ];

    for (sent, expected) in cases {
        let body: Value = client
            .post(server.url("/api/py/hello"))
            .body(sent.to_vec())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let object = body.as_object().unwrap();
        assert!(object.contains_key("body"), "POST must always carry a body key");
        assert_eq!(object["body"], expected, "body sent: {:?}", sent);
    }
}

#[tokio::test]
async fn test_post_over_limit_rejected() {
    let mut config = EchoConfig::default();
    config.security.max_body_size = 16;
    let server = TestServer::start(config).await;

    let res = client()
        .post(server.url("/api/py/hello"))
        .body("x".repeat(64))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = TestServer::start(EchoConfig::default()).await;

    let doc: Value = client()
        .get(server.url("/api/py/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(doc["openapi"], "3.1.0");
    assert!(doc["paths"]["/api/py/hello"]["get"].is_object());
    assert!(doc["paths"]["/api/py/hello"]["post"].is_object());
}
