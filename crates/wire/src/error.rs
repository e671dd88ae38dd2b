//! Error types for the wire protocol.

use std::io;
use thiserror::Error;

/// Result type alias for wire operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wire operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing-level errors.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Codec errors during serialization/deserialization.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Framing-level errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload does not fit in the frame length field.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge {
        /// Size of the rejected payload.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Stream closed after the length prefix but before the full payload.
    #[error("Stream closed mid-frame: expected {expected} payload bytes, got {got}")]
    Truncated {
        /// Payload length announced by the prefix.
        expected: usize,
        /// Payload bytes that actually arrived.
        got: usize,
    },
}

/// Codec-related errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("Failed to serialize: {0}")]
    Serialization(String),

    /// Deserialization failed.
    #[error("Failed to deserialize: {0}")]
    Deserialization(String),

    /// Severity code outside the enumerated set.
    #[error("Unknown level code: {0}")]
    UnknownLevel(u8),
}
