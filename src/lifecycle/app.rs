use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::config::ServerConfig;
use crate::framework::FetchSource;
use crate::server::{router, AppContext};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// The runtime orchestrator: owns the context and drives the listener.
///
/// # Example
///
/// ```ignore
/// let app = App::new(ServerConfig::default());
/// app.run().await?; // until Ctrl+C / SIGTERM
/// ```
pub struct App {
    ctx: Arc<AppContext>,
}

impl App {
    /// An app backed by the simulated fetch source.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            ctx: Arc::new(AppContext::new(config)),
        }
    }

    /// An app backed by a caller-supplied fetch source.
    pub fn with_source(config: ServerConfig, source: Arc<dyn FetchSource>) -> Self {
        Self {
            ctx: Arc::new(AppContext::with_source(config, source)),
        }
    }

    pub fn router(&self) -> Router {
        router(self.ctx.clone())
    }

    /// Binds the configured address and serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.ctx.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr().map_err(ServerError::Serve)?;
        info!(addr = %local, "Server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
