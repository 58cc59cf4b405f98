//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn missing_input<S: Into<String>>(message: S) -> Self {
        Self::MissingInput(message.into())
    }

    pub fn invalid_multipart<S: Into<String>>(message: S) -> Self {
        Self::InvalidMultipart(message.into())
    }

    pub fn payment_initiation<S: Into<String>>(message: S) -> Self {
        Self::PaymentInitiationFailed(message.into())
    }

    pub fn unrecognized_shape<S: Into<String>>(description: S) -> Self {
        Self::UnrecognizedProviderShape(description.into())
    }

    pub fn invalid_image_url<S: Into<String>>(candidate: S) -> Self {
        Self::InvalidImageUrl(candidate.into())
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Wrap a failure that happened after money changed hands
    pub fn after_payment<S: Into<String>>(receipt_id: S, reason: &GatewayError) -> Self {
        Self::TransformFailedAfterPayment {
            receipt_id: receipt_id.into(),
            reason: reason.to_string(),
        }
    }
}
