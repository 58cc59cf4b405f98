//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Payment service configuration
    #[serde(default)]
    pub payment: PaymentConfig,
}
