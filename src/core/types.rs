//! Request and result types for image transformation

use crate::utils::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A user-selected image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// MIME type as declared by the uploader
    pub mime_type: String,
    /// Original file name
    pub filename: String,
}

impl ImageUpload {
    pub fn new(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            filename: filename.into(),
        }
    }

    /// Read an image from disk, rejecting files that are not images
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_for_path(path).ok_or_else(|| {
            GatewayError::missing_input(
                "Invalid file type. Please select an image file (PNG, JPG, JPEG, WebP)",
            )
        })?;
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::new(bytes, mime_type, filename))
    }

    /// Encode as `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Guess an image MIME type from the file extension
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// One user submission: image, prompt and optional payment receipt
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub image: ImageUpload,
    pub prompt: String,
    pub payment_receipt: Option<String>,
}

impl TransformRequest {
    /// Build a request, failing with `MissingInput` if the image or prompt is absent
    pub fn new(
        image: Option<ImageUpload>,
        prompt: Option<String>,
        payment_receipt: Option<String>,
    ) -> Result<Self> {
        let image = image.filter(|image| !image.bytes.is_empty());
        let prompt = prompt.filter(|prompt| !prompt.trim().is_empty());

        match (image, prompt) {
            (Some(image), Some(prompt)) => Ok(Self {
                image,
                prompt,
                payment_receipt: payment_receipt.filter(|id| !id.trim().is_empty()),
            }),
            _ => Err(GatewayError::missing_input("Image and prompt are required")),
        }
    }

    /// First characters of the prompt, for log lines
    pub fn prompt_preview(&self) -> String {
        self.prompt.chars().take(50).collect()
    }
}

/// The only artifact downstream code may rely on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub image_url: String,
}
