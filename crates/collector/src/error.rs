//! Error types for the collectors.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for collector operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to bind the listener.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Codec or framing failure on a connection.
    #[error(transparent)]
    Wire(#[from] logship_wire::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record handler refused a record.
    #[error("Handler error: {0}")]
    Handler(String),
}
