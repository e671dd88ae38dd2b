//! Request/response envelopes for the unary transport.
//!
//! The unary binding ships one record per call. Each request carries a v4 UUID
//! so responses can be correlated on a multiplexed connection; the envelope
//! layer owns message boundaries, the caller never frames anything itself.

use crate::error::{CodecError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Method name for submitting a single record.
pub const LOG_METHOD: &str = "log_message";

/// One unary call's request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: Uuid,
    /// Method being invoked.
    pub method: String,
    /// Codec-serialized record.
    pub payload: Vec<u8>,
}

impl RequestEnvelope {
    /// Build a record-submission request around a serialized record.
    #[must_use]
    pub fn log_message(payload: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: LOG_METHOD.to_string(),
            payload,
        }
    }

    /// Serialize the envelope for transmission.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope cannot be serialized.
    pub fn to_bytes(&self) -> Result<Bytes> {
        bincode::serialize(self)
            .map(Bytes::from)
            .map_err(|e| CodecError::Serialization(e.to_string()).into())
    }

    /// Deserialize an envelope received off the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not a valid envelope.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data).map_err(|e| CodecError::Deserialization(e.to_string()).into())
    }
}

/// The call's direct outcome: an ack, or a carried failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response is for.
    pub request_id: Uuid,
    /// Present when the collector rejected the record.
    pub error: Option<ErrorInfo>,
}

impl ResponseEnvelope {
    /// Successful acknowledgment.
    #[must_use]
    pub const fn ack(request_id: Uuid) -> Self {
        Self {
            request_id,
            error: None,
        }
    }

    /// Failed call carrying a status code and message.
    #[must_use]
    pub fn error(request_id: Uuid, code: &str, message: &str) -> Self {
        Self {
            request_id,
            error: Some(ErrorInfo {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    /// Serialize the envelope for transmission.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope cannot be serialized.
    pub fn to_bytes(&self) -> Result<Bytes> {
        bincode::serialize(self)
            .map(Bytes::from)
            .map_err(|e| CodecError::Serialization(e.to_string()).into())
    }

    /// Deserialize an envelope received off the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not a valid envelope.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data).map_err(|e| CodecError::Deserialization(e.to_string()).into())
    }
}

/// Status carried by a failed call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code for categorization.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_envelope_roundtrip() {
        let request = RequestEnvelope::log_message(vec![1, 2, 3]);
        let decoded = RequestEnvelope::from_bytes(&request.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.id, request.id);
        assert_eq!(decoded.method, LOG_METHOD);
        assert_eq!(decoded.payload, vec![1, 2, 3]);
    }

    #[test]
    fn ack_carries_no_error() {
        let id = Uuid::new_v4();
        let decoded = ResponseEnvelope::from_bytes(&ResponseEnvelope::ack(id).to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.request_id, id);
        assert!(decoded.error.is_none());
    }

    #[test]
    fn error_response_carries_status() {
        let id = Uuid::new_v4();
        let response = ResponseEnvelope::error(id, "DECODE_ERROR", "bad payload");
        let decoded = ResponseEnvelope::from_bytes(&response.to_bytes().unwrap()).unwrap();

        let info = decoded.error.unwrap();
        assert_eq!(info.code, "DECODE_ERROR");
        assert_eq!(info.message, "bad payload");
    }

    #[test]
    fn malformed_envelope_is_rejected() {
        assert!(RequestEnvelope::from_bytes(&[0xFF; 3]).is_err());
    }
}
