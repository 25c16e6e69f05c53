use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{decode_text_deltas, UpstreamConfig};
use crate::application::{CompletionService, TextStream};
use crate::domain::{Completion, CompletionOptions, ConversationMessage, DomainError};

const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
    thinking: Thinking,
}

#[derive(Serialize)]
struct Thinking {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Value,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
/// (Volcengine Ark, OpenAI, LM Studio, ...).
///
/// Missing configuration fails before any network traffic. Transport
/// errors, timeouts, non-2xx statuses and bodies without a first choice all
/// surface as [`DomainError::UpstreamError`].
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    url: String,
}

impl HttpCompletionClient {
    pub fn new(config: UpstreamConfig) -> Self {
        let url = config.endpoint(COMPLETIONS_PATH);
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
        let missing = self.config.missing_settings();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::upstream(format!(
                "completion API is not configured (missing {})",
                missing.join(", ")
            )))
        }
    }

    async fn send(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
        stream: bool,
    ) -> Result<reqwest::Response, DomainError> {
        self.ensure_configured()?;

        let request = ApiRequest {
            model: self.config.model(),
            messages,
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
            stream,
            thinking: Thinking {
                kind: if options.deep_reasoning() {
                    "enabled"
                } else {
                    "disabled"
                },
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
                        "completion request timed out after {}s",
                        self.config.timeout().as_secs()
                    ))
                } else {
                    DomainError::upstream(format!("completion request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "completion API returned {status}"
            )));
        }

        Ok(response)
    }

    /// Decode a completion body into its first choice's text.
    fn parse_completion(body: &str) -> Result<Completion, DomainError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| {
            DomainError::upstream(format!("completion response is not JSON: {e}"))
        })?;
        let parsed: ApiResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            DomainError::upstream(format!("unexpected completion response shape: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::upstream("completion response has no choices"))?;

        let text = match choice.message.content {
            Value::String(text) => text,
            Value::Null => String::new(),
            structured => structured.to_string(),
        };

        Ok(Completion::new(text, raw))
    }
}

#[async_trait]
impl CompletionService for HttpCompletionClient {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<Completion, DomainError> {
        let response = self.send(messages, options, false).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::upstream(format!("failed to read completion body: {e}")))?;

        let completion = Self::parse_completion(&body)?;
        debug!("Completion received ({} chars)", completion.text().len());
        Ok(completion)
    }

    async fn stream(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<TextStream, DomainError> {
        let response = self.send(messages, options, true).await?;
        Ok(decode_text_deltas(response.bytes_stream()))
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
