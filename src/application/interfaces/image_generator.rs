use async_trait::async_trait;

use crate::domain::{DomainError, ImageGenerationOutcome};

/// Turns a text prompt into generated image URLs.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate images for `prompt`, returning their URLs in upstream order.
    ///
    /// A structurally invalid upstream response is an error, never an empty outcome.
    async fn generate_images(&self, prompt: &str) -> Result<ImageGenerationOutcome, DomainError>;

    fn model_name(&self) -> &str;
}
