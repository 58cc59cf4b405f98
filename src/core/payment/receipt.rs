//! Payment receipts

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Settlement status of a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Initiated,
    Completed,
    Failed,
    Unknown,
}

impl ReceiptStatus {
    /// Map a status string from the payment service; only the literal
    /// "completed" counts as settled
    pub fn from_service(status: &str) -> Self {
        match status {
            "completed" => ReceiptStatus::Completed,
            "initiated" | "pending" => ReceiptStatus::Initiated,
            "failed" => ReceiptStatus::Failed,
            _ => ReceiptStatus::Unknown,
        }
    }

    pub fn is_completed(self) -> bool {
        self == ReceiptStatus::Completed
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReceiptStatus::Initiated => "initiated",
            ReceiptStatus::Completed => "completed",
            ReceiptStatus::Failed => "failed",
            ReceiptStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Opaque identifier of one payment attempt plus its last known status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String,
    pub status: ReceiptStatus,
}

impl PaymentReceipt {
    /// Receipt freshly returned by initiation
    pub fn initiated(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: ReceiptStatus::Initiated,
        }
    }

    /// Extract the receipt from an initiation result.
    ///
    /// Accepts a bare string or an object carrying an `id`; anything else, or
    /// a blank id, is an initiation failure.
    pub fn from_initiation(result: &Value) -> Result<Self> {
        let id = match result {
            Value::String(id) => id.clone(),
            Value::Object(map) => match map.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Number(id)) => id.to_string(),
                _ => {
                    return Err(GatewayError::payment_initiation(
                        "Invalid payment result received",
                    ));
                }
            },
            _ => {
                return Err(GatewayError::payment_initiation(
                    "Invalid payment result received",
                ));
            }
        };

        if id.trim().is_empty() {
            return Err(GatewayError::payment_initiation(
                "Payment was cancelled or failed",
            ));
        }

        Ok(Self::initiated(id))
    }
}
