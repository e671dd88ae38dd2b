//! Stream collector: one decoded record per frame, per connection.

use crate::error::{Error, Result};
use crate::handler::RecordHandler;
use futures::StreamExt;
use logship_wire::{codec, FrameCodec, MAX_FRAME_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Semaphore};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};

/// Configuration shared by both collectors.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Maximum concurrent connections.
    pub max_connections: usize,
    /// Maximum accepted frame payload size.
    pub max_frame_size: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_connections: 100,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

/// Listener that accepts framed stream connections from producers.
///
/// Each connection is read until the peer closes cleanly between frames. A
/// framing, decode, or handler failure closes that connection only; other
/// producers keep sending.
pub struct StreamCollector<H: RecordHandler> {
    listener: TcpListener,
    handler: Arc<H>,
    config: CollectorConfig,
}

impl<H: RecordHandler> StreamCollector<H> {
    /// Bind the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, handler: H, config: CollectorConfig) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        info!("stream collector listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            handler: Arc::new(handler),
            config,
        })
    }

    /// The address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(Error::Io)
    }

    /// Accept connections until `shutdown` fires.
    ///
    /// # Errors
    ///
    /// Infallible in practice; accept errors are logged and the loop
    /// continues.
    pub async fn serve(self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let Ok(permit) = Arc::clone(&semaphore).try_acquire_owned() else {
                                warn!("connection limit reached, dropping {peer}");
                                continue;
                            };
                            let handler = Arc::clone(&self.handler);
                            let max_frame_size = self.config.max_frame_size;

                            tokio::spawn(async move {
                                debug!("producer connected from {peer}");
                                if let Err(e) =
                                    handle_connection(stream, handler, max_frame_size).await
                                {
                                    error!("connection from {peer} failed: {e}");
                                }
                                drop(permit);
                            });
                        }
                        Err(e) => error!("accept failed: {e}"),
                    }
                }
                _ = &mut shutdown => {
                    info!("stream collector shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

async fn handle_connection<H: RecordHandler>(
    stream: TcpStream,
    handler: Arc<H>,
    max_frame_size: usize,
) -> Result<()> {
    let mut frames = FramedRead::new(
        stream,
        FrameCodec::new().with_max_frame_size(max_frame_size),
    );

    while let Some(frame) = frames.next().await {
        // A framing error (including a truncated final frame) is a connection
        // fault; the producer reconnects if it wants to resume.
        let payload = frame?;
        let record = codec::decode(&payload)?;
        handler.handle(record).await?;
    }

    debug!("producer disconnected cleanly");
    Ok(())
}
