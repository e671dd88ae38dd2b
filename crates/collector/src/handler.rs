//! Record consumption behind the collectors.

use crate::error::{Error, Result};
use async_trait::async_trait;
use logship_wire::LogRecord;
use tokio::sync::mpsc;

/// Consumes decoded records.
///
/// One handler instance is shared across all connections of a collector, so
/// implementations must tolerate concurrent calls. Returning an error rejects
/// that record only: the stream collector closes the offending connection, the
/// RPC collector answers the call with an error status.
#[async_trait]
pub trait RecordHandler: Send + Sync + 'static {
    /// Consume one record.
    async fn handle(&self, record: LogRecord) -> Result<()>;
}

/// Renders records to stdout as fixed-width lines.
pub struct StdoutHandler;

#[async_trait]
impl RecordHandler for StdoutHandler {
    async fn handle(&self, record: LogRecord) -> Result<()> {
        println!("{}", render(&record));
        Ok(())
    }
}

/// Forwards records into an in-process channel.
pub struct ChannelHandler {
    tx: mpsc::Sender<LogRecord>,
}

impl ChannelHandler {
    /// Create a handler forwarding into `tx`.
    #[must_use]
    pub const fn new(tx: mpsc::Sender<LogRecord>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl RecordHandler for ChannelHandler {
    async fn handle(&self, record: LogRecord) -> Result<()> {
        self.tx
            .send(record)
            .await
            .map_err(|_| Error::Handler("record channel closed".to_string()))
    }
}

/// Render one record as a fixed-width log line.
#[must_use]
pub fn render(record: &LogRecord) -> String {
    format!(
        "{:<33} {:<12} {:<15} {:<8} {:<20} {:<25} {:<6} {}",
        record.timestamp,
        truncate(&record.hostname, 12),
        truncate(&record.logger_name, 15),
        record.level.as_str(),
        truncate(&record.filename, 20),
        truncate(&record.function_name, 25),
        truncate(&record.line_number, 6),
        record.message
    )
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
