//! Stream client behavior against a real TCP accept side.

use futures::StreamExt;
use logship_client::{Error, RecordSink, StreamClient};
use logship_wire::{codec, FrameCodec, Level, LogRecord};
use tokio::net::TcpListener;
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
async fn sends_one_frame_per_record_in_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let accept = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut frames = FramedRead::new(stream, FrameCodec::new());

        let mut messages = Vec::new();
        while let Some(frame) = frames.next().await {
            let payload = frame.unwrap();
            messages.push(codec::decode(&payload).unwrap().message);
        }
        messages
    });

    let client = StreamClient::connect(addr).await.unwrap();
    client.submit(&record("one", Level::Info)).await.unwrap();
    client.submit(&record("two", Level::Warning)).await.unwrap();
    client.submit(&record("three", Level::Error)).await.unwrap();
    client.close().await.unwrap();

    let messages = accept.await.unwrap();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn submit_after_close_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accept = tokio::spawn(async move { listener.accept().await.unwrap() });

    let client = StreamClient::connect(addr).await.unwrap();
    assert!(client.is_open().await);

    client.close().await.unwrap();
    assert!(!client.is_open().await);

    let result = client.submit(&record("late", Level::Debug)).await;
    assert!(matches!(result, Err(Error::Closed)));

    drop(accept.await.unwrap());
}

#[tokio::test]
async fn write_error_permanently_closes_client() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = StreamClient::connect(addr).await.unwrap();
    let (stream, _) = listener.accept().await.unwrap();
    drop(stream);
    drop(listener);

    // Early writes may land in the OS buffer; keep submitting until the
    // peer reset surfaces as a write error.
    let mut failure = None;
    for _ in 0..200 {
        match client.submit(&record("doomed", Level::Error)).await {
            Ok(()) => tokio::time::sleep(std::time::Duration::from_millis(1)).await,
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    let failure = failure.expect("writes kept succeeding after peer close");
    assert!(!matches!(failure, Error::Closed));

    assert!(!client.is_open().await);
    let result = client.submit(&record("late", Level::Debug)).await;
    assert!(matches!(result, Err(Error::Closed)));
}

#[tokio::test]
async fn connect_failure_is_terminal_and_reported() {
    // Bind and immediately drop to find a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    match StreamClient::connect(addr).await {
        Err(Error::Connect { addr: failed, .. }) => assert_eq!(failed, addr),
        Err(other) => panic!("expected Connect error, got {other:?}"),
        Ok(_) => panic!("connect unexpectedly succeeded"),
    }
}
