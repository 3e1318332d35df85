// Transport-level failure tests for the query client

use adx_client::{AdxClient, ClientError};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::time::timeout;

use crate::common::{schema_payload, test_client};

#[tokio::test]
async fn test_unreachable_server() {
    let client = test_client();

    let start = Instant::now();
    let result = timeout(
        Duration::from_secs(10),
        client.kusto_request("http://127.0.0.1:1", &schema_payload(), None),
    )
    .await
    .expect("request should not hang");

    // Connection timeout is 2 seconds
    assert!(start.elapsed() < Duration::from_secs(3), "Connection should fail within 3 seconds");
    let err = result.unwrap_err();
    assert!(err.is_transport(), "Expected transport error, got {:?}", err);
}

#[tokio::test]
async fn test_invalid_endpoint() {
    let client = test_client();

    let result = client.kusto_request("not a url", &schema_payload(), None).await;

    match result {
        Err(ClientError::Transport(msg)) => assert!(msg.contains("HTTP request failed")),
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_zero_timeout_fails_without_result() {
    let client = AdxClient::with_timeouts(Duration::ZERO, Duration::ZERO).unwrap();

    let result = timeout(
        Duration::from_secs(10),
        client.kusto_request("http://127.0.0.1:1", &schema_payload(), None),
    )
    .await
    .expect("request should not hang");

    assert!(result.unwrap_err().is_transport());
}

/// Accepts connections and holds them open without ever answering
async fn spawn_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let url = spawn_silent_server().await;
    let client = AdxClient::with_timeouts(Duration::from_millis(300), Duration::from_secs(2)).unwrap();

    let start = Instant::now();
    let result = timeout(
        Duration::from_secs(10),
        client.kusto_request(&url, &schema_payload(), None),
    )
    .await
    .expect("request should not hang");

    assert!(start.elapsed() < Duration::from_secs(5));
    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(_)), "Expected Timeout error, got {:?}", err);
    assert!(err.is_transport());
}
