//! Wire protocol for shipping structured log records.
//!
//! One log event is a [`LogRecord`]. The CBOR codec turns a record into an
//! opaque byte buffer and back. On a raw byte stream each buffer travels as a
//! frame: a 4-byte big-endian length prefix followed by exactly that many
//! payload bytes, imposed by [`FrameCodec`]. The unary transport instead wraps
//! the buffer in a correlated request/response envelope ([`rpc`]).
//!
//! # Example
//!
//! ```
//! use logship_wire::{codec, Level, LogRecord};
//!
//! let record = LogRecord {
//!     timestamp: "2025-01-28T12:34:56Z".to_string(),
//!     hostname: "worker-1".to_string(),
//!     logger_name: "app".to_string(),
//!     module: "billing".to_string(),
//!     level: Level::Info,
//!     filename: "billing.rs".to_string(),
//!     function_name: "charge".to_string(),
//!     line_number: "42".to_string(),
//!     message: "charged".to_string(),
//!     path_name: "/src/billing.rs".to_string(),
//!     process_id: "100".to_string(),
//!     process_name: "worker".to_string(),
//!     thread_id: "1".to_string(),
//!     thread_name: "main".to_string(),
//!     service_name: "billing".to_string(),
//!     stack_trace: None,
//! };
//!
//! let payload = codec::encode(&record).unwrap();
//! assert_eq!(codec::decode(&payload).unwrap(), record);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod framing;
pub mod record;
pub mod rpc;

pub use error::{CodecError, Error, ProtocolError, Result};
pub use framing::{FrameCodec, LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE};
pub use record::{Level, LogRecord};

// Re-export dependencies that are part of our public API
pub use bytes::Bytes;
