//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from `path`, falling back to defaults plus environment
pub async fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    info!("📄 Loading configuration file: {}", path.display());

    if !path.exists() {
        warn!(
            "⚠️  Configuration file {} not found, using defaults and environment",
            path.display()
        );
        return Config::from_env();
    }

    let config = Config::from_file(path).await?;
    info!("✅ Configuration file loaded successfully");
    Ok(config)
}

/// Run the server with automatic configuration loading
pub async fn run_server(config_path: impl AsRef<Path>) -> Result<()> {
    info!("🚀 Starting ImagePay Gateway");

    let config = load_config(config_path).await?;

    let server = ServerBuilder::new().with_config(config.clone()).build().await?;
    info!(
        "🌐 Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/transform - Image transformation");
    if config.payment().strict_verification {
        info!("🔒 Strict payment verification enabled");
    }

    server.start().await
}
