//! Image generation providers

pub mod error;
pub mod replicate;

pub use error::ProviderError;
pub use replicate::ReplicateProvider;

use crate::core::output::ProviderOutput;
use crate::core::types::TransformRequest;
use async_trait::async_trait;

/// A hosted image-generation service
///
/// One call per transformation; implementations must not retry.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Run the model on the request's image and prompt
    async fn generate(&self, request: &TransformRequest) -> Result<ProviderOutput, ProviderError>;
}
