//! Unary transport client: one record per correlated request/response call.

use crate::error::{Error, Result};
use crate::sink::RecordSink;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use logship_wire::rpc::{RequestEnvelope, ResponseEnvelope};
use logship_wire::{codec, FrameCodec, LogRecord};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio_util::codec::Framed;
use tracing::{debug, error, warn};
use uuid::Uuid;

type Pending = Arc<DashMap<Uuid, oneshot::Sender<ResponseEnvelope>>>;

/// Client that ships one record per RPC call.
///
/// Unlike the stream binding there is no shared framing state to corrupt:
/// independent calls may be issued concurrently from many tasks and are
/// matched to their responses by request ID. A response carrying an error
/// status fails only that call. No built-in retry.
pub struct UnaryClient {
    sink: Mutex<SplitSink<Framed<TcpStream, FrameCodec>, Bytes>>,
    pending: Pending,
    closed: Arc<AtomicBool>,
}

impl UnaryClient {
    /// Open a connection to the collector and start the response router.
    ///
    /// # Errors
    ///
    /// Returns an error on refusal, timeout, or resolution failure.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| Error::Connect { addr, source })?;

        let framed = Framed::new(stream, FrameCodec::new());
        let (sink, read) = framed.split();
        let pending: Pending = Arc::new(DashMap::new());
        let closed = Arc::new(AtomicBool::new(false));

        let router_pending = Arc::clone(&pending);
        let router_closed = Arc::clone(&closed);
        tokio::spawn(async move {
            Self::route_responses(read, router_pending, router_closed).await;
        });

        debug!("unary transport connected to {addr}");

        Ok(Self {
            sink: Mutex::new(sink),
            pending,
            closed,
        })
    }

    /// Dispatch incoming responses to the calls waiting on them.
    async fn route_responses(
        mut read: SplitStream<Framed<TcpStream, FrameCodec>>,
        pending: Pending,
        closed: Arc<AtomicBool>,
    ) {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(payload) => match ResponseEnvelope::from_bytes(&payload) {
                    Ok(response) => {
                        if let Some((_, tx)) = pending.remove(&response.request_id) {
                            let _ = tx.send(response);
                        } else {
                            warn!("response for unknown request {}", response.request_id);
                        }
                    }
                    Err(e) => error!("failed to decode response envelope: {e}"),
                },
                Err(e) => {
                    error!("unary transport read failed: {e}");
                    break;
                }
            }
        }

        // Mark the client closed before draining so a submit racing with
        // shutdown either sees the flag or finds its sender dropped here.
        // Dropping the senders wakes every in-flight call with ChannelClosed.
        closed.store(true, Ordering::SeqCst);
        pending.clear();
        debug!("unary response router stopped");
    }

    /// Whether the connection is still serviceable.
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    /// Submit one record and await the call's direct outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails, the transport fails, or the
    /// collector answers with an error status. The caller decides whether to
    /// retry, drop, or abort.
    pub async fn submit_record(&self, record: &LogRecord) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::Closed);
        }

        let payload = codec::encode(record)?;
        let request = RequestEnvelope::log_message(payload.to_vec());
        let frame = request.to_bytes()?;

        let (tx, rx) = oneshot::channel();
        self.pending.insert(request.id, tx);

        // The router drains `pending` only after setting the flag, so a
        // waiter registered before the flag flip is still woken by the drain.
        if self.closed.load(Ordering::SeqCst) {
            self.pending.remove(&request.id);
            return Err(Error::Closed);
        }

        {
            let mut sink = self.sink.lock().await;
            if let Err(e) = sink.send(frame).await {
                self.pending.remove(&request.id);
                return Err(e.into());
            }
        }

        let response = rx.await.map_err(|_| Error::ChannelClosed)?;
        match response.error {
            None => Ok(()),
            Some(status) => Err(Error::Rpc {
                code: status.code,
                message: status.message,
            }),
        }
    }
}

#[async_trait]
impl RecordSink for UnaryClient {
    async fn submit(&self, record: &LogRecord) -> Result<()> {
        self.submit_record(record).await
    }
}
