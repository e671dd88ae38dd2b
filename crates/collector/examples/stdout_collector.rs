//! Run a stream collector that prints every record to stdout.
//!
//! Point a `StreamClient` at the printed address and each submitted record
//! shows up as one fixed-width line.

use logship_collector::{CollectorConfig, Result, StdoutHandler, StreamCollector};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let collector = StreamCollector::bind(
        "127.0.0.1:9020".parse().expect("static address"),
        StdoutHandler,
        CollectorConfig::default(),
    )
    .await?;

    println!("collecting on {}", collector.local_addr()?);

    // Runs until killed.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    collector.serve(shutdown_rx).await
}
