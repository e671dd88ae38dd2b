//! CBOR codec for the record envelope.
//!
//! The codec is a pure encode/decode pair with no shared state; independent
//! callers may use it concurrently.

use crate::error::{CodecError, Result};
use crate::record::LogRecord;
use bytes::Bytes;

/// Encode a record into CBOR bytes.
///
/// # Errors
///
/// Returns an error if the record cannot be serialized.
pub fn encode(record: &LogRecord) -> Result<Bytes> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(record, &mut buf)
        .map_err(|e| CodecError::Serialization(e.to_string()))?;
    Ok(Bytes::from(buf))
}

/// Decode CBOR bytes into a record.
///
/// # Errors
///
/// Returns an error if the buffer is truncated, malformed, or carries a level
/// code outside the enumerated set.
pub fn decode(data: &[u8]) -> Result<LogRecord> {
    ciborium::de::from_reader(data)
        .map_err(|e| CodecError::Deserialization(e.to_string()))
        .map_err(Into::into)
}
