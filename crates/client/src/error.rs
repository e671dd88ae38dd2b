//! Error types for the transport clients.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to establish the connection.
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        /// The address we tried to connect to.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The client already closed after an earlier failure or shutdown.
    #[error("Client is closed")]
    Closed,

    /// Codec or framing failure.
    #[error(transparent)]
    Wire(#[from] logship_wire::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The collector rejected the call.
    #[error("Call failed with {code}: {message}")]
    Rpc {
        /// Status code carried by the response.
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The response channel closed before a reply arrived.
    #[error("Channel closed")]
    ChannelClosed,
}
