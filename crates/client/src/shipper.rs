//! Background worker draining an in-process queue into one sink.

use crate::error::{Error, Result};
use crate::sink::RecordSink;
use logship_wire::LogRecord;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Queue-fed sender that serializes submissions to a single sink.
///
/// Concurrent producers hand records to the queue; the worker submits them one
/// at a time, preserving queue order on the sink's connection. The first
/// failed submission terminates the worker; remaining queued records are
/// dropped and the failure surfaces through [`Shipper::join`].
pub struct Shipper {
    tx: mpsc::Sender<LogRecord>,
    worker: JoinHandle<Result<()>>,
}

impl Shipper {
    /// Spawn a worker draining a queue of up to `capacity` records into `sink`.
    #[must_use]
    pub fn spawn(sink: Arc<dyn RecordSink>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let worker = tokio::spawn(Self::run(sink, rx));
        Self { tx, worker }
    }

    async fn run(sink: Arc<dyn RecordSink>, mut rx: mpsc::Receiver<LogRecord>) -> Result<()> {
        while let Some(record) = rx.recv().await {
            if let Err(e) = sink.submit(&record).await {
                error!("shipper stopping after failed submit: {e}");
                return Err(e);
            }
        }
        debug!("shipper drained and stopped");
        Ok(())
    }

    /// Queue one record, waiting for capacity.
    ///
    /// # Errors
    ///
    /// Fails once the worker has stopped.
    pub async fn ship(&self, record: LogRecord) -> Result<()> {
        self.tx.send(record).await.map_err(|_| Error::ChannelClosed)
    }

    /// Stop accepting records, drain the queue, and return the worker's fate.
    ///
    /// # Errors
    ///
    /// Surfaces the submit error that stopped the worker, if any.
    pub async fn join(self) -> Result<()> {
        drop(self.tx);
        match self.worker.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::ChannelClosed),
        }
    }
}
