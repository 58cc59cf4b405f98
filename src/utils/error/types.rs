//! Error types for the gateway

use crate::core::providers::ProviderError;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server startup and runtime errors
    #[error("Server error: {0}")]
    Server(String),

    /// Image or prompt missing from the submission
    #[error("{0}")]
    MissingInput(String),

    /// Multipart body could not be read
    #[error("Invalid multipart data: {0}")]
    InvalidMultipart(String),

    /// Uploaded image exceeds the configured limit
    #[error("Image is too large: {size} bytes (limit {limit} bytes)")]
    ImageTooLarge { size: usize, limit: usize },

    /// A text form field exceeds the configured limit
    #[error("Field '{field}' is too large (limit {limit} bytes)")]
    FieldTooLarge { field: String, limit: usize },

    /// Payment initiation threw or returned no usable receipt
    #[error("{0}")]
    PaymentInitiationFailed(String),

    /// Receipt status was not "completed" while strict verification is enabled
    #[error("Payment not completed")]
    PaymentNotCompleted { receipt_id: String, status: String },

    /// Generation provider call failed
    #[error("Failed to transform image: {0}")]
    Provider(#[from] ProviderError),

    /// Provider output matched none of the known shapes
    #[error("Unrecognized response format from AI model: {0}")]
    UnrecognizedProviderShape(String),

    /// Resolved candidate is not an absolute http(s) URL
    #[error("Invalid image URL format received from AI model: {0}")]
    InvalidImageUrl(String),

    /// Transformation failed after the payment was taken
    #[error(
        "Transformation failed after payment ({reason}). Please contact support with payment ID: {receipt_id}"
    )]
    TransformFailedAfterPayment { receipt_id: String, reason: String },

    /// Remote transformation endpoint rejected the request
    #[error("Failed to transform image: {status} {message}")]
    Remote { status: u16, message: String },

    /// Payment gate transition not allowed from the current state
    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    /// Catch-all
    #[error("Failed to transform image: {0}")]
    Internal(String),
}
