//! Unary client behavior against a real TCP accept side.

use futures::StreamExt;
use logship_client::{Error, RecordSink, UnaryClient};
use logship_wire::{FrameCodec, Level, LogRecord};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_util::codec::FramedRead;

fn record(message: &str, level: Level) -> LogRecord {
    LogRecord {
        timestamp: "2025-01-28T12:34:56Z".to_string(),
        hostname: "worker-1".to_string(),
        logger_name: "app".to_string(),
        module: "billing".to_string(),
        level,
        filename: "billing.rs".to_string(),
        function_name: "charge".to_string(),
        line_number: "42".to_string(),
        message: message.to_string(),
        path_name: "/src/billing.rs".to_string(),
        process_id: "100".to_string(),
        process_name: "worker".to_string(),
        thread_id: "1".to_string(),
        thread_name: "main".to_string(),
        service_name: "billing".to_string(),
        stack_trace: None,
    }
}

#[tokio::test]
async fn submit_after_disconnect_fails_fast() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = UnaryClient::connect(addr).await.unwrap();
    assert!(client.is_open());

    // Drop the accept side so the response router sees EOF and stops.
    let (stream, _) = listener.accept().await.unwrap();
    drop(stream);
    drop(listener);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(!client.is_open());

    // A first TCP write after a peer close can still land in the OS buffer,
    // so the call must fail by observing the closed state, not the write.
    let result = timeout(Duration::from_secs(2), client.submit(&record("late", Level::Info)))
        .await
        .expect("submit must not block once the router has stopped");
    assert!(matches!(result, Err(Error::Closed)));
}

#[tokio::test]
async fn in_flight_call_is_woken_when_connection_dies() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let accept = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut frames = FramedRead::new(stream, FrameCodec::new());
        // Take the request so the call is in flight, then die without answering.
        frames.next().await.unwrap().unwrap();
    });

    let client = UnaryClient::connect(addr).await.unwrap();

    let result = timeout(
        Duration::from_secs(2),
        client.submit(&record("unanswered", Level::Warning)),
    )
    .await
    .expect("in-flight call must be woken by router shutdown");
    assert!(matches!(result, Err(Error::ChannelClosed)));

    accept.await.unwrap();
}
