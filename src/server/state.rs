//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::transform::ImageTransformer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Read-only after startup; every field is behind an `Arc` so worker threads
/// share one provider client and one payment client.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Transformation pipeline
    pub transformer: Arc<dyn ImageTransformer>,
}

impl AppState {
    pub fn new(config: Config, transformer: Arc<dyn ImageTransformer>) -> Self {
        Self {
            config: Arc::new(config),
            transformer,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
