//! The submit-one-record capability.

use crate::error::Result;
use async_trait::async_trait;
use logship_wire::LogRecord;

/// A destination that accepts one record per submission.
///
/// Both transport bindings implement this: the stream client maps a submission
/// to one frame on its connection, the unary client to one RPC call. `submit`
/// returns once the record has been handed to the transport (stream) or
/// acknowledged by the collector (unary); there is no retry at this layer.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Submit a single record, observing success or failure.
    async fn submit(&self, record: &LogRecord) -> Result<()>;
}
