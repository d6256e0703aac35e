use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use qrlink_core::config::RemoteConfig;
use qrlink_core::error::QrLinkError;
use qrlink_core::remote::{RemoteSender, SendOutcome};

#[derive(Clone, Default)]
struct Received {
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

async fn record(State(state): State<Received>, headers: HeaderMap, body: String) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.requests.lock().unwrap().push((content_type, body));
    StatusCode::OK
}

async fn spawn_receiver(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn sender_for(addr: SocketAddr) -> RemoteSender {
    RemoteSender::new(&RemoteConfig {
        endpoint: format!("http://{addr}/qr"),
        timeout_secs: Some(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_send_posts_json_body() {
    let state = Received::default();
    let router = Router::new()
        .route("/qr", post(record))
        .with_state(state.clone());
    let addr = spawn_receiver(router).await;

    let payload = "say \"hi\"\nback\\slash ✓";
    let outcome = sender_for(addr).send(payload).await.unwrap();
    assert_eq!(outcome, SendOutcome::Delivered { status: 200 });
    assert_eq!(outcome.to_string(), "QR sent successfully");

    let requests = state.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (content_type, body) = &requests[0];
    assert_eq!(content_type, "application/json; charset=utf-8");

    let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(parsed["content"], payload);
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let router = Router::new().route("/qr", post(|| async { StatusCode::BAD_REQUEST }));
    let addr = spawn_receiver(router).await;

    let outcome = sender_for(addr).send("anything").await.unwrap();
    assert_eq!(outcome, SendOutcome::Rejected { status: 400 });
    assert!(!outcome.is_delivered());
    assert!(outcome.to_string().contains("400"));
}

#[tokio::test]
async fn test_unreachable_collector_is_network_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = sender_for(addr).send("lost").await.unwrap_err();
    assert!(matches!(err, QrLinkError::Network(_)), "got: {err}");
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let err = RemoteSender::new(&RemoteConfig {
        endpoint: "not a url".into(),
        timeout_secs: None,
    })
    .unwrap_err();
    assert!(matches!(err, QrLinkError::InvalidUrl(_)));
}
