//! Generation provider configuration

use super::*;
use crate::core::providers::replicate::ModelRef;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL
    #[serde(default = "default_provider_api_base")]
    pub api_base: String,
    /// API token; usually supplied through `REPLICATE_API_TOKEN`
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    /// Model reference, `owner/name` or `owner/name:version`
    #[serde(default = "default_model")]
    pub model: String,
    /// Deadline for one prediction in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout: u64,
    /// Delay between status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Wrap URL outputs into file outputs
    #[serde(default = "default_true")]
    pub file_output: bool,
    /// Model tuning parameters sent with every prediction
    #[serde(default)]
    pub params: GenerationParams,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_provider_api_base(),
            api_token: None,
            model: default_model(),
            timeout: default_provider_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            file_output: true,
            params: GenerationParams::default(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_base)
            .map_err(|e| format!("Invalid provider api_base '{}': {}", self.api_base, e))?;

        ModelRef::parse(&self.model).map_err(|e| e.to_string())?;

        if self.timeout == 0 {
            return Err("Provider timeout cannot be 0".to_string());
        }

        if self.poll_interval_ms == 0 {
            return Err("Poll interval cannot be 0".to_string());
        }

        Ok(())
    }
}

/// Fixed tuning bundle for the image-editing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub speed_mode: String,
    pub seed: i64,
    pub output_format: String,
    pub output_quality: u32,
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
    pub image_guidance_scale: f64,
    pub refine_strength: f64,
    pub clip_cfg_norm: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            speed_mode: "Juiced 🔥 (more speed)".to_string(),
            seed: -1,
            output_format: "webp".to_string(),
            output_quality: 80,
            guidance_scale: 2.5,
            num_inference_steps: 28,
            image_guidance_scale: 1.0,
            refine_strength: 0.3,
            clip_cfg_norm: true,
        }
    }
}
