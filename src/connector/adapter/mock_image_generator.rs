use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::application::ImageGenerator;
use crate::domain::{DomainError, ImageGenerationOutcome};

/// Offline image generator returning a stable placeholder URL per prompt.
pub struct MockImageGenerator;

impl MockImageGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_images(&self, prompt: &str) -> Result<ImageGenerationOutcome, DomainError> {
        let mut hasher = DefaultHasher::new();
        prompt.hash(&mut hasher);
        let url = format!("https://images.invalid/mock/{:016x}.png", hasher.finish());
        Ok(ImageGenerationOutcome::new(vec![url]))
    }

    fn model_name(&self) -> &str {
        "mock-image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_prompt_same_url() {
        let generator = MockImageGenerator::new();
        let a = generator.generate_images("ramen").await.unwrap();
        let b = generator.generate_images("ramen").await.unwrap();
        let c = generator.generate_images("tacos").await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
