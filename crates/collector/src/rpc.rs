//! RPC collector: one record per request, acknowledged per call.

use crate::error::{Error, Result};
use crate::handler::RecordHandler;
use crate::stream::CollectorConfig;
use futures::{SinkExt, StreamExt};
use logship_wire::rpc::{RequestEnvelope, ResponseEnvelope, LOG_METHOD};
use logship_wire::{codec, FrameCodec};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Semaphore};
use tokio_util::codec::Framed;
use tracing::{debug, error, info, warn};

/// Listener answering unary record submissions.
///
/// Every request gets a direct outcome: an acknowledgment, or an error status
/// naming what the collector rejected. A failed record fails only its own
/// call; the connection stays usable for the caller's other requests.
pub struct RpcCollector<H: RecordHandler> {
    listener: TcpListener,
    handler: Arc<H>,
    config: CollectorConfig,
}

impl<H: RecordHandler> RpcCollector<H> {
    /// Bind the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, handler: H, config: CollectorConfig) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        info!("rpc collector listening on {}", listener.local_addr()?);

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
                                debug!("caller connected from {peer}");
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
                    info!("rpc collector shutting down");
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
    let mut framed = Framed::new(
        stream,
        FrameCodec::new().with_max_frame_size(max_frame_size),
    );

    while let Some(frame) = framed.next().await {
        let payload = frame?;
        let request = RequestEnvelope::from_bytes(&payload)?;
        let response = process_request(&request, handler.as_ref()).await;
        framed.send(response.to_bytes()?).await?;
    }

    debug!("caller disconnected cleanly");
    Ok(())
}

async fn process_request<H: RecordHandler>(
    request: &RequestEnvelope,
    handler: &H,
) -> ResponseEnvelope {
    if request.method != LOG_METHOD {
        return ResponseEnvelope::error(
            request.id,
            "UNKNOWN_METHOD",
            &format!("no handler for method {}", request.method),
        );
    }

    let record = match codec::decode(&request.payload) {
        Ok(record) => record,
        Err(e) => return ResponseEnvelope::error(request.id, "DECODE_ERROR", &e.to_string()),
    };

    match handler.handle(record).await {
        Ok(()) => ResponseEnvelope::ack(request.id),
        Err(e) => ResponseEnvelope::error(request.id, "HANDLER_ERROR", &e.to_string()),
    }
}
