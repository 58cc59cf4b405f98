//! Saving a transformed image to disk

use crate::core::output::FileOutput;
use crate::core::providers::ProviderError;
use crate::core::types::NormalizedResult;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use url::Url;

/// Stream the result image into `path`, returning the number of bytes written
pub async fn download(
    result: &NormalizedResult,
    client: &reqwest::Client,
    path: impl AsRef<Path>,
) -> Result<u64> {
    let path = path.as_ref();
    let url = Url::parse(&result.image_url)
        .map_err(|_| GatewayError::invalid_image_url(result.image_url.clone()))?;

    let stream = FileOutput::new(url, client.clone()).stream().await?;
    let written = save_stream(stream, path).await?;

    info!(path = %path.display(), bytes = written, "Image saved");
    Ok(written)
}

/// Write every chunk to `path`; a failed transfer leaves no file behind
async fn save_stream<S>(stream: S, path: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, ProviderError>> + Unpin,
{
    let file = tokio::fs::File::create(path).await?;

    match write_chunks(stream, file).await {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), error = %remove_err, "Failed to remove partial download");
            }
            Err(e)
        }
    }
}

async fn write_chunks<S>(mut stream: S, mut file: tokio::fs::File) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, ProviderError>> + Unpin,
{
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
