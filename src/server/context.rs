use std::sync::Arc;

use crate::framework::{FetchSource, SimulatedSource};
use crate::lifecycle::ServerConfig;

/// Everything a handler may depend on, built once and passed to the router.
///
/// There is no global state: tests build their own context with whatever
/// [`FetchSource`] they need.
pub struct AppContext {
    pub config: ServerConfig,
    pub source: Arc<dyn FetchSource>,
}

impl AppContext {
    /// Context backed by the [`SimulatedSource`].
    pub fn new(config: ServerConfig) -> Self {
        Self::with_source(config, Arc::new(SimulatedSource))
    }

    pub fn with_source(config: ServerConfig, source: Arc<dyn FetchSource>) -> Self {
        Self { config, source }
    }
}
