//! Transport clients for shipping log records to a collector.
//!
//! One capability, two bindings. [`StreamClient`] owns a persistent framed TCP
//! connection and sends one frame per record; [`UnaryClient`] issues one
//! correlated request/response call per record over a multiplexed connection.
//! Both implement [`RecordSink`], so producers pick a binding without caring
//! which wire discipline sits underneath. [`Shipper`] feeds any sink from an
//! in-process queue when producers outnumber connections.
//!
//! Neither binding retries or applies deadlines; a failed submit surfaces to
//! the caller, who owns that policy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod shipper;
pub mod sink;
pub mod stream;
pub mod unary;

pub use error::{Error, Result};
pub use shipper::Shipper;
pub use sink::RecordSink;
pub use stream::StreamClient;
pub use unary::UnaryClient;
