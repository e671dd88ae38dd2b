//! Collector side of the log shipping protocol.
//!
//! Two listeners share one consumption seam. [`StreamCollector`] accepts
//! framed connections and decodes one record per frame until the peer closes;
//! [`RpcCollector`] answers each request envelope with an acknowledgment.
//! Decoded records flow into a [`RecordHandler`], which is all a deployment
//! needs to customize.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handler;
pub mod rpc;
pub mod stream;

pub use error::{Error, Result};
pub use handler::{render, ChannelHandler, RecordHandler, StdoutHandler};
pub use rpc::RpcCollector;
pub use stream::{CollectorConfig, StreamCollector};
