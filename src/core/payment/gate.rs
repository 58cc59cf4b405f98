//! Pay-before-compute gate
//!
//! ```text
//! idle -> paying -> paid -> processing -> complete
//!           |                   |
//!           +----> error <------+
//! ```
//!
//! `error` and `complete` are terminal until an explicit reset returns the
//! gate to `idle`.

use super::{PaymentProvider, PaymentReceipt, PaymentRequest, ReceiptStatus};
use crate::config::PaymentConfig;
use crate::core::transform::ImageTransformer;
use crate::core::types::{ImageUpload, NormalizedResult, TransformRequest};
use crate::utils::error::{GatewayError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Gate state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Paying,
    Paid {
        receipt: PaymentReceipt,
    },
    Processing {
        receipt: PaymentReceipt,
    },
    Complete {
        receipt: PaymentReceipt,
        result: NormalizedResult,
    },
    /// `receipt` is only kept when money was taken
    Error {
        message: String,
        receipt: Option<PaymentReceipt>,
    },
}

/// Inputs that drive the gate
#[derive(Debug)]
pub enum GateEvent {
    /// User submitted a valid image and prompt
    Start,
    /// Payment service returned a receipt
    ReceiptIssued(PaymentReceipt),
    /// Payment initiation failed or returned nothing usable
    InitiationFailed(String),
    /// Hand the paid request to the transformer
    Process,
    /// Transformation produced an image
    Transformed(NormalizedResult),
    /// Transformation failed after payment
    TransformFailed(GatewayError),
    /// User-initiated reset
    Reset,
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::Paying => "paying",
            GateState::Paid { .. } => "paid",
            GateState::Processing { .. } => "processing",
            GateState::Complete { .. } => "complete",
            GateState::Error { .. } => "error",
        }
    }

    /// Transition function
    pub fn apply(self, event: GateEvent) -> Result<GateState> {
        match (self, event) {
            (GateState::Idle, GateEvent::Start) => Ok(GateState::Paying),
            (GateState::Paying, GateEvent::ReceiptIssued(receipt)) => {
                Ok(GateState::Paid { receipt })
            }
            (GateState::Paying, GateEvent::InitiationFailed(message)) => Ok(GateState::Error {
                message,
                receipt: None,
            }),
            (GateState::Paid { receipt }, GateEvent::Process) => {
                Ok(GateState::Processing { receipt })
            }
            (GateState::Processing { receipt }, GateEvent::Transformed(result)) => {
                Ok(GateState::Complete { receipt, result })
            }
            (GateState::Processing { receipt }, GateEvent::TransformFailed(reason)) => {
                let message = GatewayError::after_payment(receipt.id.clone(), &reason).to_string();
                Ok(GateState::Error {
                    message,
                    receipt: Some(receipt),
                })
            }
            (
                GateState::Idle | GateState::Complete { .. } | GateState::Error { .. },
                GateEvent::Reset,
            ) => Ok(GateState::Idle),
            (state, event) => Err(GatewayError::invalid_state(format!(
                "{:?} is not allowed in state {}",
                event,
                state.name()
            ))),
        }
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        match self {
            GateState::Paid { receipt }
            | GateState::Processing { receipt }
            | GateState::Complete { receipt, .. } => Some(receipt),
            GateState::Error { receipt, .. } => receipt.as_ref(),
            GateState::Idle | GateState::Paying => None,
        }
    }

    pub fn result(&self) -> Option<&NormalizedResult> {
        match self {
            GateState::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GateState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Complete { .. } | GateState::Error { .. })
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orchestrates payment, optional verification and transformation for one
/// interaction
pub struct PaymentGate {
    payments: Arc<dyn PaymentProvider>,
    transformer: Arc<dyn ImageTransformer>,
    config: PaymentConfig,
    state: GateState,
}

impl PaymentGate {
    pub fn new(
        payments: Arc<dyn PaymentProvider>,
        transformer: Arc<dyn ImageTransformer>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            payments,
            transformer,
            config,
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    fn advance(&mut self, event: GateEvent) -> Result<()> {
        let previous = self.state.name();
        let next = self.state.clone().apply(event)?;
        info!(from = previous, to = next.name(), "Payment gate transition");
        self.state = next;
        Ok(())
    }

    /// Return to `idle` from a terminal state
    pub fn reset(&mut self) -> Result<()> {
        self.advance(GateEvent::Reset)
    }

    /// Pay, then transform.
    ///
    /// Missing input is rejected locally and leaves the gate idle. Payment and
    /// transformation failures end in the `error` state and are reported
    /// through [`GateState`], not as `Err`.
    pub async fn submit(&mut self, image: Option<ImageUpload>, prompt: &str) -> Result<&GateState> {
        if self.state != GateState::Idle {
            return Err(GatewayError::invalid_state(format!(
                "submit is not allowed in state {}",
                self.state.name()
            )));
        }

        let image = match image {
            Some(image) if !image.bytes.is_empty() && !prompt.trim().is_empty() => image,
            _ => {
                return Err(GatewayError::missing_input(
                    "Please select an image and enter a prompt first",
                ));
            }
        };

        self.advance(GateEvent::Start)?;

        let receipt = match self.initiate_payment().await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Payment failed: {}", e);
                self.advance(GateEvent::InitiationFailed(e.to_string()))?;
                return Ok(&self.state);
            }
        };
        info!(payment_id = %receipt.id, "Payment successful");
        self.advance(GateEvent::ReceiptIssued(receipt))?;

        if self.config.verify_before_transform {
            self.verify_receipt().await;
        }

        self.advance(GateEvent::Process)?;
        let receipt_id = self
            .state
            .receipt()
            .map(|receipt| receipt.id.clone())
            .ok_or_else(|| GatewayError::invalid_state("processing without a receipt"))?;

        let request = TransformRequest {
            image,
            prompt: prompt.to_string(),
            payment_receipt: Some(receipt_id.clone()),
        };

        match self.transformer.transform(request).await {
            Ok(result) => {
                info!(payment_id = %receipt_id, image_url = %result.image_url, "Transformation complete");
                self.advance(GateEvent::Transformed(result))?;
            }
            Err(e) => {
                error!(payment_id = %receipt_id, error = %e, "Paid transformation failed");
                self.advance(GateEvent::TransformFailed(e))?;
            }
        }

        Ok(&self.state)
    }

    async fn initiate_payment(&self) -> Result<PaymentReceipt> {
        let request = PaymentRequest::from(&self.config);
        let result = self
            .payments
            .initiate(&request)
            .await
            .map_err(|e| GatewayError::payment_initiation(e.to_string()))?;
        PaymentReceipt::from_initiation(&result)
    }

    /// Best-effort status lookup; never blocks the transformation
    async fn verify_receipt(&mut self) {
        let GateState::Paid { receipt } = &mut self.state else {
            return;
        };

        match self.payments.status(&receipt.id, self.config.testnet).await {
            Ok(status) => {
                receipt.status = ReceiptStatus::from_service(&status);
                if !receipt.status.is_completed() {
                    warn!(payment_id = %receipt.id, %status, "Payment not completed yet, continuing");
                }
            }
            Err(e) => {
                receipt.status = ReceiptStatus::Unknown;
                warn!(payment_id = %receipt.id, error = %e, "Payment verification failed, continuing");
            }
        }
    }
}
