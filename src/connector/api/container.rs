use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::application::{ChatTurnUseCase, CompletionService, ImageGenerator};
use crate::connector::adapter::{
    HttpCompletionClient, HttpImageClient, MockCompletion, MockImageGenerator, UpstreamConfig,
};
use crate::domain::CompletionOptions;

pub const SERVICE_NAME: &str = "dishtalk-chat";

pub struct ContainerConfig {
    pub upstream: UpstreamConfig,
    pub completion_options: CompletionOptions,
    /// Replace both upstreams with deterministic in-process mocks.
    pub mock_upstream: bool,
    /// Include internal error details in 500 responses.
    pub dev_mode: bool,
}

impl ContainerConfig {
    /// Read upstream settings from the environment; `APP_ENV=development`
    /// turns on development mode.
    pub fn from_env() -> Self {
        let dev_mode = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);
        Self {
            upstream: UpstreamConfig::from_env(),
            completion_options: CompletionOptions::default(),
            mock_upstream: false,
            dev_mode,
        }
    }
}

/// Snapshot reported by `GET /chat` and `dishtalk health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: &'static str,
    pub service: &'static str,
    pub api: String,
    pub api_configured: bool,
    pub api_model: String,
    pub timestamp: String,
}

pub struct Container {
    completion_service: Arc<dyn CompletionService>,
    image_generator: Arc<dyn ImageGenerator>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let (completion_service, image_generator): (
            Arc<dyn CompletionService>,
            Arc<dyn ImageGenerator>,
        ) = if config.mock_upstream {
            debug!("Using mock completion and image services");
            (
                Arc::new(MockCompletion::new()),
                Arc::new(MockImageGenerator::new()),
            )
        } else {
            debug!(
                "Using upstream at {} (model {})",
                config.upstream.base_url(),
                config.upstream.model()
            );
            (
                Arc::new(HttpCompletionClient::new(config.upstream.clone())),
                Arc::new(HttpImageClient::new(config.upstream.clone())),
            )
        };

        Self::with_services(config, completion_service, image_generator)
    }

    /// Build a container around explicit service objects.
    pub fn with_services(
        config: ContainerConfig,
        completion_service: Arc<dyn CompletionService>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            completion_service,
            image_generator,
            config,
        }
    }

    pub fn chat_turn_use_case(&self) -> ChatTurnUseCase {
        self.chat_turn_use_case_with(self.config.completion_options)
    }

    pub fn chat_turn_use_case_with(&self, options: CompletionOptions) -> ChatTurnUseCase {
        ChatTurnUseCase::new(
            self.completion_service.clone(),
            self.image_generator.clone(),
        )
        .with_options(options)
    }

    pub fn completion_service(&self) -> Arc<dyn CompletionService> {
        self.completion_service.clone()
    }

    pub fn completion_options(&self) -> CompletionOptions {
        self.config.completion_options
    }

    pub fn dev_mode(&self) -> bool {
        self.config.dev_mode
    }

    pub fn health(&self) -> ServiceHealth {
        let (api, api_configured) = if self.config.mock_upstream {
            ("mock".to_string(), true)
        } else {
            (
                self.config.upstream.base_url().to_string(),
                self.config.upstream.is_configured(),
            )
        };

        ServiceHealth {
            status: "healthy",
            service: SERVICE_NAME,
            api,
            api_configured,
            api_model: self.completion_service.model_name().to_string(),
            timestamp: timestamp_now(),
        }
    }
}

/// Current UTC time as an ISO 8601 string with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(upstream: UpstreamConfig, mock_upstream: bool) -> ContainerConfig {
        ContainerConfig {
            upstream,
            completion_options: CompletionOptions::default(),
            mock_upstream,
            dev_mode: false,
        }
    }

    #[test]
    fn health_reports_unconfigured_upstream() {
        let container = Container::new(config(UpstreamConfig::default(), false));
        let health = container.health();
        assert_eq!(health.status, "healthy");
        assert!(!health.api_configured);
        assert_eq!(health.api_model, "");
    }

    #[test]
    fn health_reports_configured_model() {
        let upstream = UpstreamConfig::new("key", "https://llm.test/api/v3", "chat-model");
        let health = Container::new(config(upstream, false)).health();
        assert!(health.api_configured);
        assert_eq!(health.api, "https://llm.test/api/v3");
        assert_eq!(health.api_model, "chat-model");
    }

    #[test]
    fn health_serializes_camel_case() {
        let health = Container::new(config(UpstreamConfig::default(), true)).health();
        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["apiConfigured"], true);
        assert_eq!(value["apiModel"], "mock-chat");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
