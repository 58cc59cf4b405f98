//! Wallet micropayments
//!
//! Payment initiation and status lookup are delegated to an external payment
//! service. Server-side status checks are advisory: a receipt that is not
//! reported as "completed" does not block a transformation unless strict
//! verification is configured.

pub mod client;
pub mod error;
pub mod gate;
pub mod receipt;

pub use client::HttpPaymentProvider;
pub use error::PaymentError;
pub use gate::{GateEvent, GateState, PaymentGate};
pub use receipt::{PaymentReceipt, ReceiptStatus};

use crate::config::PaymentConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payment initiation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Destination address
    pub to: String,
    /// Amount in currency units, e.g. "0.20"
    pub amount: String,
    /// Test network flag
    pub testnet: bool,
}

impl From<&PaymentConfig> for PaymentRequest {
    fn from(config: &PaymentConfig) -> Self {
        Self {
            to: config.recipient.clone(),
            amount: config.amount.clone(),
            testnet: config.testnet,
        }
    }
}

/// External wallet-payment service
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start a payment; returns the raw result (bare id or object with `id`)
    async fn initiate(&self, request: &PaymentRequest) -> Result<Value, PaymentError>;

    /// Look up the raw status string of a receipt
    async fn status(&self, receipt_id: &str, testnet: bool) -> Result<String, PaymentError>;
}
