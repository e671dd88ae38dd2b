//! Stream transport client: one persistent framed connection.

use crate::error::{Error, Result};
use crate::sink::RecordSink;
use async_trait::async_trait;
use futures::SinkExt;
use logship_wire::{codec, FrameCodec, LogRecord};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::codec::FramedWrite;
use tracing::{debug, warn};

type FrameSink = FramedWrite<TcpStream, FrameCodec>;

/// Client that ships records over one TCP connection, one frame per record.
///
/// The connection is exclusively owned by this client and sends are serialized
/// internally, so two frames can never interleave and corrupt the receiver's
/// length-prefix parsing. Any encode or transport error closes the connection
/// for good; a new [`StreamClient::connect`] is required to resume sending.
pub struct StreamClient {
    addr: SocketAddr,
    sink: Mutex<Option<FrameSink>>,
}

impl StreamClient {
    /// Open a connection to the collector.
    ///
    /// # Errors
    ///
    /// Returns an error on refusal, timeout, or resolution failure. Terminal:
    /// retry policy, if any, belongs to the caller.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| Error::Connect { addr, source })?;

        debug!("stream transport connected to {addr}");

        Ok(Self {
            addr,
            sink: Mutex::new(Some(FramedWrite::new(stream, FrameCodec::new()))),
        })
    }

    /// Encode and send one record as one frame.
    ///
    /// Returns once the frame has been written and flushed to the transport.
    /// There is no application-level acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails; either failure closes
    /// the client permanently.
    pub async fn send_record(&self, record: &LogRecord) -> Result<()> {
        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(Error::Closed)?;

        let outcome = match codec::encode(record) {
            Ok(payload) => sink.send(payload).await.map_err(Error::from),
            Err(e) => Err(Error::from(e)),
        };

        if let Err(e) = outcome {
            // No resuming mid-stream: the peer's framing state is unknown.
            if let Some(mut sink) = guard.take() {
                let _ = sink.close().await;
            }
            warn!("stream transport to {} closed: {e}", self.addr);
            return Err(e);
        }

        Ok(())
    }

    /// Whether the client can still send.
    pub async fn is_open(&self) -> bool {
        self.sink.lock().await.is_some()
    }

    /// Gracefully shut down the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or closing the transport fails.
    pub async fn close(&self) -> Result<()> {
        if let Some(mut sink) = self.sink.lock().await.take() {
            sink.close().await?;
            debug!("stream transport to {} closed", self.addr);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSink for StreamClient {
    async fn submit(&self, record: &LogRecord) -> Result<()> {
        self.send_record(record).await
    }
}
