//! Admission-gate tests against a transport that counts in-flight
//! connections.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use openalex_mcp::client::OpenAlexClient;
use openalex_mcp::config::Config;
use openalex_mcp::models::{ListResponse, Work};
use openalex_mcp::query::QuerySpec;

/// Minimal HTTP server that answers every request with an empty works list
/// after `delay`, tracking the peak number of simultaneous connections.
async fn start_counting_server(delay: Duration) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let peak = Arc::new(AtomicUsize::new(0));
    let in_flight = Arc::new(AtomicUsize::new(0));

    let peak_handle = Arc::clone(&peak);
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak_handle);
            tokio::spawn(async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);

                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(delay).await;

                // Decrement before replying; the caller holds its permit
                // until the body is read.
                in_flight.fetch_sub(1, Ordering::SeqCst);

                let body = r#"{"meta":{"count":0},"results":[]}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), peak)
}

#[tokio::test]
async fn test_gate_bounds_in_flight_requests() {
    let (uri, peak) = start_counting_server(Duration::from_millis(200)).await;

    let mut config = Config::for_testing(&uri);
    config.max_concurrent_requests = 10;
    let client = Arc::new(OpenAlexClient::new(&config));

    let tasks: Vec<_> = (0..15)
        .map(|_| {
            let client = Arc::clone(&client);
            let config = config.clone();
            tokio::spawn(async move {
                let spec = QuerySpec::new(10, &config);
                client.list::<ListResponse<Work>>("works", &spec).await
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        assert!(result.unwrap().is_ok());
    }

    let observed = peak.load(Ordering::SeqCst);
    assert!(
        observed <= 10,
        "gate admitted {} simultaneous requests",
        observed
    );
    // The gate should still allow real concurrency within the bound.
    assert!(observed > 1, "requests were serialized, peak {}", observed);
}

#[tokio::test]
async fn test_single_permit_serializes_requests() {
    let (uri, peak) = start_counting_server(Duration::from_millis(50)).await;

    let mut config = Config::for_testing(&uri);
    config.max_concurrent_requests = 1;
    let client = Arc::new(OpenAlexClient::new(&config));

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let client = Arc::clone(&client);
            let config = config.clone();
            tokio::spawn(async move {
                let spec = QuerySpec::new(10, &config);
                client.list::<ListResponse<Work>>("works", &spec).await
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        assert!(result.unwrap().is_ok());
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1);
}
