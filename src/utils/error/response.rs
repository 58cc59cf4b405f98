//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingInput(_) | GatewayError::InvalidMultipart(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::ImageTooLarge { .. } | GatewayError::FieldTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            GatewayError::PaymentNotCompleted { .. }
            | GatewayError::PaymentInitiationFailed(_) => StatusCode::PAYMENT_REQUIRED,
            GatewayError::InvalidState(_) => StatusCode::CONFLICT,
            GatewayError::Remote { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            GatewayError::Config(_)
            | GatewayError::Io(_)
            | GatewayError::Server(_)
            | GatewayError::Yaml(_)
            | GatewayError::Serialization(_)
            | GatewayError::HttpClient(_)
            | GatewayError::Provider(_)
            | GatewayError::Internal(_) => "Failed to transform image".to_string(),
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
