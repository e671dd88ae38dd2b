//! Receive-side behavior over mock streams with adversarial chunking.

use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use logship_wire::{codec, Error, FrameCodec, Level, LogRecord, ProtocolError};
use tokio_test::io::Builder;
use tokio_util::codec::{Encoder, FramedRead};

fn sample_record(message: &str) -> LogRecord {
    LogRecord {
        timestamp: "2025-01-28T12:34:56Z".to_string(),
        hostname: "worker-1".to_string(),
        logger_name: "app".to_string(),
        module: "billing".to_string(),
        level: Level::Info,
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

fn frame(payload: &Bytes) -> BytesMut {
    let mut buf = BytesMut::new();
    FrameCodec::new().encode(payload.clone(), &mut buf).unwrap();
    buf
}

#[tokio::test]
async fn one_record_received_one_byte_at_a_time() {
    let record = sample_record("hello");
    let wire_bytes = frame(&codec::encode(&record).unwrap());

    let mut mock = Builder::new();
    for byte in wire_bytes.iter() {
        mock.read(&[*byte]);
    }

    let mut frames = FramedRead::new(mock.build(), FrameCodec::new());

    let payload = frames.next().await.unwrap().unwrap();
    let decoded = codec::decode(&payload).unwrap();
    assert_eq!(decoded.message, "hello");
    assert_eq!(decoded.level, Level::Info);
    assert_eq!(decoded.level.code(), 1);

    // The exhausted stream reads as a clean close.
    assert!(frames.next().await.is_none());
}

#[tokio::test]
async fn adjacent_frames_never_merge_or_split() {
    let p1 = Bytes::from("first payload");
    let p2 = Bytes::from("second");

    let mut wire_bytes = frame(&p1);
    wire_bytes.extend_from_slice(&frame(&p2));

    // Deliver the two frames in pathological chunks straddling the boundary.
    let chunks: Vec<&[u8]> = wire_bytes.chunks(3).collect();
    let mut mock = Builder::new();
    for chunk in chunks {
        mock.read(chunk);
    }

    let mut frames = FramedRead::new(mock.build(), FrameCodec::new());
    assert_eq!(frames.next().await.unwrap().unwrap(), p1);
    assert_eq!(frames.next().await.unwrap().unwrap(), p2);
    assert!(frames.next().await.is_none());
}

#[tokio::test]
async fn close_after_prefix_is_truncation_error() {
    let mut partial = BytesMut::new();
    partial.put_u32(100);
    partial.put_slice(b"only twenty bytes of:");

    let mock = Builder::new().read(&partial).build();
    let mut frames = FramedRead::new(mock, FrameCodec::new());

    let result = frames.next().await.unwrap();
    assert!(matches!(
        result,
        Err(Error::Protocol(ProtocolError::Truncated { expected: 100, .. }))
    ));
}

#[tokio::test]
async fn close_with_nothing_pending_is_end_of_stream() {
    let mock = Builder::new().build();
    let mut frames = FramedRead::new(mock, FrameCodec::new());

    assert!(frames.next().await.is_none());
    assert!(frames.next().await.is_none());
}

#[tokio::test]
async fn close_inside_prefix_is_end_of_stream() {
    let mock = Builder::new().read(&[0, 0]).build();
    let mut frames = FramedRead::new(mock, FrameCodec::new());

    assert!(frames.next().await.is_none());
}
