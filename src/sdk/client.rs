//! HTTP client for the transformation endpoint

use crate::core::transform::ImageTransformer;
use crate::core::types::{NormalizedResult, TransformRequest};
use crate::utils::error::{ErrorResponse, GatewayError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Path of the transformation endpoint
pub const TRANSFORM_PATH: &str = "/api/transform";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransformResponse {
    image_url: Option<String>,
}

/// Client side of `POST /api/transform`
#[derive(Debug, Clone)]
pub struct TransformClient {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl TransformClient {
    /// Create a client for the gateway at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(base_url, http_client)
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Result<Self> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(TRANSFORM_PATH))
            .map_err(|e| GatewayError::config(format!("Invalid gateway URL {}: {}", base_url, e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    fn form(request: TransformRequest) -> Result<Form> {
        let image = Part::bytes(request.image.bytes)
            .file_name(request.image.filename)
            .mime_str(&request.image.mime_type)
            .map_err(|e| GatewayError::invalid_multipart(e.to_string()))?;

        let mut form = Form::new()
            .part("image", image)
            .text("prompt", request.prompt);
        if let Some(receipt) = request.payment_receipt {
            form = form.text("paymentId", receipt);
        }
        Ok(form)
    }

    /// Submit one request and return the normalized URL
    pub async fn submit(&self, request: TransformRequest) -> Result<NormalizedResult> {
        info!(
            endpoint = %self.endpoint,
            has_receipt = request.payment_receipt.is_some(),
            "Sending transformation request"
        );

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .multipart(Self::form(request)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Transformation response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| "Failed to transform image".to_string());
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TransformResponse = serde_json::from_slice(&body)?;
        match parsed.image_url {
            Some(image_url) if !image_url.is_empty() => Ok(NormalizedResult { image_url }),
            _ => Err(GatewayError::invalid_image_url(
                "No image URL received from server",
            )),
        }
    }
}

#[async_trait]
impl ImageTransformer for TransformClient {
    async fn transform(&self, request: TransformRequest) -> Result<NormalizedResult> {
        self.submit(request).await
    }
}
