//! Image transformation endpoint

use crate::config::ServerConfig;
use crate::core::types::{ImageUpload, TransformRequest, mime_for_path};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;
use std::path::Path;
use tracing::{error, info, warn};

const DEFAULT_FILENAME: &str = "image";
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Fields collected from the multipart form
#[derive(Debug, Default)]
struct TransformForm {
    image: Option<ImageUpload>,
    prompt: Option<String>,
    payment_id: Option<String>,
}

/// Per-field size limits, in bytes
struct FieldLimits {
    image: usize,
    text: usize,
}

impl From<&ServerConfig> for FieldLimits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            image: config.max_body_size,
            text: config.max_text_field_size,
        }
    }
}

/// `POST /api/transform`
///
/// Multipart fields: `image` (binary), `prompt` (text), optional `paymentId`.
pub async fn transform_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, &FieldLimits::from(state.config.server())).await.inspect_err(|e| {
        warn!(error = %e, "Rejected transformation request");
    })?;

    let request = TransformRequest::new(form.image, form.prompt, form.payment_id)?;

    info!(
        filename = %request.image.filename,
        size = request.image.bytes.len(),
        has_payment = request.payment_receipt.is_some(),
        "Transformation request received"
    );

    match state.transformer.transform(request).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            error!(error = %e, "Transformation request failed");
            Err(e)
        }
    }
}

async fn read_form(mut payload: Multipart, limits: &FieldLimits) -> Result<TransformForm> {
    let mut form = TransformForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| GatewayError::invalid_multipart(e.to_string()))?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "image" => form.image = Some(read_image(&mut field, limits.image).await?),
            "prompt" => form.prompt = Some(read_text(&mut field, "prompt", limits.text).await?),
            "paymentId" => {
                form.payment_id = Some(read_text(&mut field, "paymentId", limits.text).await?)
            }
            _ => {
                // Skip unknown fields
                while field.next().await.is_some() {}
            }
        }
    }

    Ok(form)
}

async fn read_image(field: &mut Field, limit: usize) -> Result<ImageUpload> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();

    let mime_type = match field.content_type() {
        Some(mime) => mime.essence_str().to_string(),
        None => mime_for_path(Path::new(&filename))
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string(),
    };

    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| GatewayError::invalid_multipart(e.to_string()))?;
        if data.len() + bytes.len() > limit {
            return Err(GatewayError::ImageTooLarge {
                size: data.len() + bytes.len(),
                limit,
            });
        }
        data.extend_from_slice(&bytes);
    }

    Ok(ImageUpload::new(data, mime_type, filename))
}

async fn read_text(field: &mut Field, name: &str, limit: usize) -> Result<String> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| GatewayError::invalid_multipart(e.to_string()))?;
        if data.len() + bytes.len() > limit {
            return Err(GatewayError::FieldTooLarge {
                field: name.to_string(),
                limit,
            });
        }
        data.extend_from_slice(&bytes);
    }
    String::from_utf8(data)
        .map_err(|_| GatewayError::invalid_multipart("text field is not valid UTF-8"))
}
