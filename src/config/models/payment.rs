//! Payment service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Payment service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Payment service base URL
    #[serde(default = "default_payment_api_base")]
    pub api_base: String,
    /// Destination wallet address
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Price per transformation, in currency units
    #[serde(default = "default_amount")]
    pub amount: String,
    /// Use the test network
    #[serde(default)]
    pub testnet: bool,
    /// Reject receipts whose status is not "completed" (HTTP 402).
    /// Off by default: the client-side confirmation is authoritative.
    #[serde(default)]
    pub strict_verification: bool,
    /// Look up the receipt status on the client before transforming
    #[serde(default = "default_true")]
    pub verify_before_transform: bool,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base: default_payment_api_base(),
            recipient: default_recipient(),
            amount: default_amount(),
            testnet: false,
            strict_verification: false,
            verify_before_transform: true,
        }
    }
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_base)
            .map_err(|e| format!("Invalid payment api_base '{}': {}", self.api_base, e))?;

        if self.recipient.trim().is_empty() {
            return Err("Payment recipient is required".to_string());
        }

        match self.amount.parse::<f64>() {
            Ok(amount) if amount > 0.0 => Ok(()),
            _ => Err(format!("Payment amount must be positive, got '{}'", self.amount)),
        }
    }
}
