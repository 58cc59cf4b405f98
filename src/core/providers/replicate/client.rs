//! Replicate Client
//!
//! Request transformation and prediction payloads

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::GenerationParams;
use crate::core::providers::ProviderError;
use crate::core::types::TransformRequest;

pub(crate) const PROVIDER_NAME: &str = "replicate";

/// Parsed `owner/name[:version]` model reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl ModelRef {
    pub fn parse(reference: &str) -> Result<Self, ProviderError> {
        let (model, version) = match reference.split_once(':') {
            Some((model, version)) => (model, Some(version.to_string())),
            None => (reference, None),
        };

        match model.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && version.as_deref() != Some("") =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    version,
                })
            }
            _ => Err(ProviderError::configuration(
                PROVIDER_NAME,
                format!("Invalid model reference '{}'", reference),
            )),
        }
    }

    /// Endpoint that creates a prediction for this model
    pub fn predictions_path(&self) -> String {
        match self.version {
            Some(_) => "/v1/predictions".to_string(),
            None => format!("/v1/models/{}/{}/predictions", self.owner, self.name),
        }
    }
}

/// Prediction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
            PredictionStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionUrls {
    #[serde(default)]
    pub get: Option<String>,
}

/// Prediction as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Value,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub urls: PredictionUrls,
}

impl Prediction {
    /// Human-readable failure reason
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => format!("prediction {}", self.status.as_str()),
            Some(other) => other.to_string(),
        }
    }
}

/// Replicate request building
pub struct ReplicateClient;

impl ReplicateClient {
    /// Model input: prompt, data-URL image and the tuning bundle
    pub fn transform_input(request: &TransformRequest, params: &GenerationParams) -> Value {
        json!({
            "prompt": request.prompt,
            "image": request.image.to_data_url(),
            "speed_mode": params.speed_mode,
            "seed": params.seed,
            "output_format": params.output_format,
            "output_quality": params.output_quality,
            "guidance_scale": params.guidance_scale,
            "num_inference_steps": params.num_inference_steps,
            "image_guidance_scale": params.image_guidance_scale,
            "refine_strength": params.refine_strength,
            "clip_cfg_norm": params.clip_cfg_norm,
        })
    }

    /// Prediction creation body
    pub fn transform_request(
        model: &ModelRef,
        request: &TransformRequest,
        params: &GenerationParams,
    ) -> Value {
        let input = Self::transform_input(request, params);
        match &model.version {
            Some(version) => json!({ "version": version, "input": input }),
            None => json!({ "input": input }),
        }
    }

    /// Decode a prediction body
    pub fn parse_prediction(body: &[u8]) -> Result<Prediction, ProviderError> {
        serde_json::from_slice(body)
            .map_err(|e| ProviderError::response_parsing(PROVIDER_NAME, e.to_string()))
    }
}
