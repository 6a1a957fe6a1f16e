//! # Runtime Lifecycle
//!
//! This module owns everything between `main` and the route table:
//!
//! 1. **Configuration** - [`ServerConfig`] with defaults, a builder, and the
//!    `--host`/`--port` [`Args`] (also read from `TYPED_GATHER_HOST`/`TYPED_GATHER_PORT`)
//! 2. **Observability** - [`setup_tracing`]
//! 3. **Serving** - [`App`] builds the [`AppContext`](crate::server::AppContext),
//!    binds the listener, and shuts down gracefully on Ctrl+C or SIGTERM
//!
//! ## Explicit Context
//!
//! There are no process-wide singletons. [`App`] constructs the context once and
//! hands it to the router as axum state; tests do the same with their own
//! [`FetchSource`](crate::framework::FetchSource).
//!
//! ```rust,ignore
//! setup_tracing();
//! let config = ServerConfig::from(Args::parse());
//! App::new(config).run().await?;
//! ```

pub mod app;
pub mod config;
pub mod tracing;

pub use app::*;
pub use config::*;
pub use self::tracing::*;
