//! # Typed Gather Server
//!
//! Entry point: parses `--host`/`--port`, sets up tracing, and serves the
//! route table from [`typed_gather::server`] until Ctrl+C or SIGTERM.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --port 8000
//! curl localhost:8000/async-demo
//! ```

use clap::Parser;
use tracing::info;
use typed_gather::lifecycle::{setup_tracing, App, Args, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServerConfig::from(Args::parse());
    info!(addr = %config.addr, "Starting typed-gather");

    App::new(config).run().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
