//! Replicate Provider Implementation

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::client::{ModelRef, PROVIDER_NAME, Prediction, PredictionStatus, ReplicateClient};
use crate::config::ProviderConfig;
use crate::core::output::ProviderOutput;
use crate::core::providers::{ImageProvider, ProviderError};
use crate::core::types::TransformRequest;

#[derive(Debug, Clone)]
pub struct ReplicateProvider {
    config: ProviderConfig,
    model: ModelRef,
    http_client: reqwest::Client,
}

impl ReplicateProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .build()
            .map_err(|e| ProviderError::configuration(PROVIDER_NAME, e.to_string()))?;

        Self::with_client(config, http_client)
    }

    pub fn with_client(
        config: ProviderConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ProviderError> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(PROVIDER_NAME, e))?;
        let model = ModelRef::parse(&config.model)?;

        Ok(Self {
            config,
            model,
            http_client,
        })
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_prediction(response: reqwest::Response) -> Result<Prediction, ProviderError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(
                PROVIDER_NAME,
                status.as_u16(),
                &String::from_utf8_lossy(&body),
            ));
        }

        ReplicateClient::parse_prediction(&body)
    }

    async fn create_prediction(
        &self,
        request: &TransformRequest,
    ) -> Result<Prediction, ProviderError> {
        let url = self.endpoint(&self.model.predictions_path());
        let body = ReplicateClient::transform_request(&self.model, request, &self.config.params);

        let response = self
            .authorize(self.http_client.post(&url))
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        Self::read_prediction(response).await
    }

    async fn fetch_prediction(&self, prediction: &Prediction) -> Result<Prediction, ProviderError> {
        let url = prediction
            .urls
            .get
            .clone()
            .unwrap_or_else(|| self.endpoint(&format!("/v1/predictions/{}", prediction.id)));

        let response = self
            .authorize(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        Self::read_prediction(response).await
    }

    /// Poll until the prediction reaches a terminal status or the deadline passes
    async fn wait_for_completion(
        &self,
        mut prediction: Prediction,
    ) -> Result<Prediction, ProviderError> {
        let deadline = Instant::now() + self.config.timeout_duration();

        while !prediction.status.is_terminal() {
            if Instant::now() >= deadline {
                return Err(ProviderError::timeout(
                    PROVIDER_NAME,
                    format!(
                        "prediction {} still {} after {}s",
                        prediction.id,
                        prediction.status.as_str(),
                        self.config.timeout
                    ),
                ));
            }

            tokio::time::sleep(self.config.poll_interval()).await;
            prediction = self.fetch_prediction(&prediction).await?;
            debug!(
                prediction_id = %prediction.id,
                status = prediction.status.as_str(),
                "Polled prediction"
            );
        }

        Ok(prediction)
    }
}

#[async_trait]
impl ImageProvider for ReplicateProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn generate(&self, request: &TransformRequest) -> Result<ProviderOutput, ProviderError> {
        info!(
            model = %self.config.model,
            image_bytes = request.image.bytes.len(),
            mime_type = %request.image.mime_type,
            "Creating prediction"
        );

        let prediction = self.create_prediction(request).await?;
        let prediction = self.wait_for_completion(prediction).await?;

        match prediction.status {
            PredictionStatus::Succeeded => {
                debug!(prediction_id = %prediction.id, output = %prediction.output, "Prediction succeeded");
                Ok(if self.config.file_output {
                    ProviderOutput::from_json_with_files(prediction.output, &self.http_client)
                } else {
                    ProviderOutput::from_json(prediction.output)
                })
            }
            status => {
                warn!(prediction_id = %prediction.id, status = status.as_str(), "Prediction did not succeed");
                Err(ProviderError::prediction_failed(
                    PROVIDER_NAME,
                    status.as_str(),
                    prediction.error_message(),
                ))
            }
        }
    }
}
