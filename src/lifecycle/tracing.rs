//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Fetches**: `Fetching...` when a task starts and `Done!` when it finishes,
//!   each carrying `source` (and `delay_ms` on start)
//! - **Fan-out/fan-in**: a `run_concurrent` span with the task count, plus debug
//!   events for every completion in the order they arrive
//! - **HTTP**: one span per request from `tower-http`'s `TraceLayer`
//! - **Validation**: a warning for every rejected request, with the number of
//!   violated fields
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default: info
//! cargo run
//!
//! # Watch completions arrive out of order while results stay in input order
//! RUST_LOG=debug cargo run
//!
//! # Only the fan-out primitive
//! RUST_LOG=typed_gather::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! `GET /async-demo` with `RUST_LOG=info`:
//!
//! ```text
//! INFO async_demo:run_concurrent: Fetching... source=SourceA delay_ms=2000
//! INFO async_demo:run_concurrent: Fetching... source=SourceB delay_ms=1000
//! INFO async_demo:run_concurrent: Fetching... source=SourceC delay_ms=1500
//! INFO async_demo:run_concurrent: Done! source=SourceB
//! INFO async_demo:run_concurrent: Done! source=SourceC
//! INFO async_demo:run_concurrent: Done! source=SourceA
//! INFO async_demo: Async demo finished results=["SourceA", "SourceB", "SourceC"]
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
