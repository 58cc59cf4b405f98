//! HTTP client for the payment service

use super::{PaymentError, PaymentProvider, PaymentRequest};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

/// Payment service reached over HTTP
///
/// `POST {base}/v1/payments` starts a payment,
/// `GET {base}/v1/payments/{id}?testnet=..` reports its status.
#[derive(Debug, Clone)]
pub struct HttpPaymentProvider {
    api_base: Url,
    http_client: reqwest::Client,
}

impl HttpPaymentProvider {
    pub fn new(api_base: &str, http_client: reqwest::Client) -> Result<Self, PaymentError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| PaymentError::InvalidResponse(format!("Invalid api_base: {}", e)))?;
        if api_base.cannot_be_a_base() {
            return Err(PaymentError::InvalidResponse(format!(
                "Invalid api_base: {}",
                api_base
            )));
        }

        Ok(Self {
            api_base,
            http_client,
        })
    }

    fn payments_url(&self, receipt_id: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "payments"]);
            if let Some(id) = receipt_id {
                segments.push(id);
            }
        }
        url
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(PaymentError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn initiate(&self, request: &PaymentRequest) -> Result<Value, PaymentError> {
        let url = self.payments_url(None);
        debug!(%url, amount = %request.amount, testnet = request.testnet, "Initiating payment");

        let response = self.http_client.post(url).json(request).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn status(&self, receipt_id: &str, testnet: bool) -> Result<String, PaymentError> {
        let mut url = self.payments_url(Some(receipt_id));
        url.query_pairs_mut()
            .append_pair("testnet", if testnet { "true" } else { "false" });
        debug!(%url, "Checking payment status");

        let response = self.http_client.get(url).send().await?;
        let response = Self::check(response).await?;
        let body: StatusResponse = response.json().await?;
        Ok(body.status)
    }
}
