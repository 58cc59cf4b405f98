//! Image transformation service
//!
//! Runs one transformation: advisory payment verification, a single provider
//! call, then output normalization.

use crate::config::PaymentConfig;
use crate::core::normalizer;
use crate::core::payment::{PaymentProvider, ReceiptStatus};
use crate::core::providers::ImageProvider;
use crate::core::types::{NormalizedResult, TransformRequest};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Anything that can turn a [`TransformRequest`] into an image URL
#[async_trait]
pub trait ImageTransformer: Send + Sync {
    async fn transform(&self, request: TransformRequest) -> Result<NormalizedResult>;
}

/// In-process transformation backed by a provider and a payment service
#[derive(Clone)]
pub struct TransformService {
    provider: Arc<dyn ImageProvider>,
    payments: Arc<dyn PaymentProvider>,
    payment_config: PaymentConfig,
}

impl TransformService {
    pub fn new(
        provider: Arc<dyn ImageProvider>,
        payments: Arc<dyn PaymentProvider>,
        payment_config: PaymentConfig,
    ) -> Self {
        Self {
            provider,
            payments,
            payment_config,
        }
    }

    /// Check a receipt with the payment service.
    ///
    /// A status other than "completed" is only logged unless strict
    /// verification is enabled; a failed lookup is always only logged. The
    /// wallet confirmation on the client is treated as authoritative.
    pub async fn verify_payment(&self, receipt_id: &str) -> Result<ReceiptStatus> {
        let status = match self
            .payments
            .status(receipt_id, self.payment_config.testnet)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                warn!(payment_id = %receipt_id, error = %e, "Payment verification failed, continuing");
                return Ok(ReceiptStatus::Unknown);
            }
        };

        let receipt_status = ReceiptStatus::from_service(&status);
        if receipt_status.is_completed() {
            info!(payment_id = %receipt_id, "Payment verified successfully");
            return Ok(receipt_status);
        }

        warn!(payment_id = %receipt_id, %status, "Payment not completed");
        if self.payment_config.strict_verification {
            return Err(GatewayError::PaymentNotCompleted {
                receipt_id: receipt_id.to_string(),
                status,
            });
        }

        Ok(receipt_status)
    }

    pub async fn run(&self, request: TransformRequest) -> Result<NormalizedResult> {
        if let Some(receipt_id) = request.payment_receipt.as_deref() {
            self.verify_payment(receipt_id).await?;
        }

        info!(
            provider = self.provider.name(),
            filename = %request.image.filename,
            mime_type = %request.image.mime_type,
            size = request.image.bytes.len(),
            prompt = %request.prompt_preview(),
            "Processing image transformation request"
        );

        let output = self.provider.generate(&request).await.map_err(|e| {
            error!(provider = e.provider(), error = %e, "Error transforming image");
            GatewayError::from(e)
        })?;
        debug!(kind = output.kind(), "Provider response received");

        let result = normalizer::normalize(&output).inspect_err(|e| {
            error!(kind = output.kind(), error = %e, "Failed to extract image URL");
        })?;

        if let Some(receipt_id) = request.payment_receipt.as_deref() {
            info!(
                payment_id = %receipt_id,
                "Payment processed for transformation: {}...",
                request.prompt_preview()
            );
        }
        info!(image_url = %result.image_url, "Transformation succeeded");

        Ok(result)
    }
}

#[async_trait]
impl ImageTransformer for TransformService {
    async fn transform(&self, request: TransformRequest) -> Result<NormalizedResult> {
        self.run(request).await
    }
}
