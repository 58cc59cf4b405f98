//! Payment service errors

/// Failure talking to the payment service
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment service unreachable: {0}")]
    Network(String),

    #[error("Payment rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid payment service response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            PaymentError::InvalidResponse(error.to_string())
        } else {
            PaymentError::Network(error.to_string())
        }
    }
}
