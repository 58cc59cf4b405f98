//! Provider error handling
//!
//! Single error type for generation providers.
//!
//! | Variant | Purpose |
//! |------|------|
//! | Authentication | Token rejected |
//! | Network | Transport failure |
//! | Timeout | Prediction did not finish before the deadline |
//! | ApiError | Non-success HTTP status |
//! | PredictionFailed | Prediction finished as failed or canceled |
//! | ResponseParsing | Body could not be decoded |
//! | Configuration | Client could not be built |

/// Unified provider error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Prediction {status} for {provider}: {message}")]
    PredictionFailed {
        provider: &'static str,
        status: String,
        message: String,
    },

    #[error("Response parsing error for {provider}: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("Configuration error for {provider}: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn prediction_failed(
        provider: &'static str,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PredictionFailed {
            provider,
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider,
            message: message.into(),
        }
    }

    /// Map a reqwest failure onto the provider taxonomy
    pub fn from_reqwest(provider: &'static str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(provider, error.to_string())
        } else if let Some(status) = error.status() {
            Self::api_error(provider, status.as_u16(), error.to_string())
        } else if error.is_decode() {
            Self::response_parsing(provider, error.to_string())
        } else {
            Self::network(provider, error.to_string())
        }
    }

    /// Map an HTTP status plus body onto the provider taxonomy
    pub fn from_status(provider: &'static str, status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .or_else(|| value.get("error"))
                    .and_then(|detail| detail.as_str().map(str::to_string))
            })
            .unwrap_or_else(|| body.to_string());

        match status {
            401 | 403 => Self::authentication(provider, message),
            _ => Self::api_error(provider, status, message),
        }
    }

    /// Provider name the error originated from
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::PredictionFailed { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::Configuration { provider, .. } => provider,
        }
    }
}
