use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::UpstreamConfig;
use crate::application::ImageGenerator;
use crate::domain::{DomainError, ImageGenerationOutcome};

const IMAGES_PATH: &str = "/images/generations";
const MAX_IMAGES: u32 = 1;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    response_format: &'static str,
    size: &'a str,
    watermark: bool,
    sequential_image_generation: &'static str,
    sequential_image_generation_options: SequentialOptions,
}

#[derive(Serialize)]
struct SequentialOptions {
    max_images: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

/// Client for an `/images/generations` endpoint returning image URLs.
pub struct HttpImageClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    url: String,
}

impl HttpImageClient {
    pub fn new(config: UpstreamConfig) -> Self {
        let url = config.endpoint(IMAGES_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .unwrap_or_default(),
            config,
            url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(UpstreamConfig::from_env())
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        let missing = self.config.missing_connection_settings();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::upstream(format!(
                "image API is not configured (missing {})",
                missing.join(", ")
            )))
        }
    }

    fn parse_urls(body: &str) -> Result<ImageGenerationOutcome, DomainError> {
        let parsed: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::upstream(format!("unexpected image response shape: {e}"))
        })?;

        Ok(ImageGenerationOutcome::new(
            parsed.data.into_iter().filter_map(|d| d.url).collect(),
        ))
    }
}

#[async_trait]
impl ImageGenerator for HttpImageClient {
    async fn generate_images(&self, prompt: &str) -> Result<ImageGenerationOutcome, DomainError> {
        self.ensure_configured()?;

        let request = ApiRequest {
            model: self.config.image_model(),
            prompt,
            response_format: "url",
            size: self.config.image_size(),
            watermark: false,
            sequential_image_generation: "disabled",
            sequential_image_generation_options: SequentialOptions {
                max_images: MAX_IMAGES,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::upstream(format!(
                        "image request timed out after {}s",
                        self.config.timeout().as_secs()
                    ))
                } else {
                    DomainError::upstream(format!("image request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Image API returned {status}: {body}");
            return Err(DomainError::upstream(format!("image API returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::upstream(format!("failed to read image body: {e}")))?;

        let outcome = Self::parse_urls(&body)?;
        debug!("Image API returned {} urls", outcome.urls().len());
        Ok(outcome)
    }

    fn model_name(&self) -> &str {
        self.config.image_model()
    }
}
