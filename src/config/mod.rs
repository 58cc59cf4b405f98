//! Configuration management for the gateway
//!
//! Configuration is read from a YAML file, then environment variables are
//! layered on top (secrets such as the provider token normally only live in
//! the environment).

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { gateway })
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.gateway.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            self.gateway.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(token) = lookup("REPLICATE_API_TOKEN") {
            self.gateway.provider.api_token = Some(token);
        }
        if let Some(model) = lookup("PROVIDER_MODEL") {
            self.gateway.provider.model = model;
        }
        if let Some(api_base) = lookup("PAYMENT_API_BASE") {
            self.gateway.payment.api_base = api_base;
        }
        if let Some(recipient) = lookup("PAYMENT_RECIPIENT") {
            self.gateway.payment.recipient = recipient;
        }
        if let Some(testnet) = lookup("BASE_PAY_TESTNET") {
            // Any value other than "true" means production
            self.gateway.payment.testnet = testnet == "true";
        }
        if let Some(strict) = lookup("PAYMENT_STRICT_VERIFICATION") {
            self.gateway.payment.strict_verification = strict.parse().map_err(|e| {
                GatewayError::Config(format!("Invalid PAYMENT_STRICT_VERIFICATION: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get provider configuration
    pub fn provider(&self) -> &ProviderConfig {
        &self.gateway.provider
    }

    /// Get payment configuration
    pub fn payment(&self) -> &PaymentConfig {
        &self.gateway.payment
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .provider
            .validate()
            .map_err(|e| GatewayError::Config(format!("Provider config error: {}", e)))?;

        self.gateway
            .payment
            .validate()
            .map_err(|e| GatewayError::Config(format!("Payment config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
