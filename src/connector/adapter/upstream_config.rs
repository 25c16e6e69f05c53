use std::time::Duration;

pub const DEFAULT_IMAGE_MODEL: &str = "doubao-seedream-4-0-250828";
pub const DEFAULT_IMAGE_SIZE: &str = "2K";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by the completion and image clients.
///
/// | Variable           | Default                      | Purpose                     |
/// |--------------------|------------------------------|-----------------------------|
/// | `LLM_API_KEY`      | none (required)              | Bearer token                |
/// | `LLM_BASE_URL`     | none (required)              | e.g. `https://ark.cn-beijing.volces.com/api/v3` |
/// | `LLM_MODEL`        | none (required)              | Text completion model       |
/// | `LLM_IMAGE_MODEL`  | `doubao-seedream-4-0-250828` | Image generation model      |
/// | `LLM_IMAGE_SIZE`   | `2K`                         | Generated image size        |
/// | `LLM_TIMEOUT_SECS` | `30`                         | Per-request timeout         |
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamConfig {
    api_key: String,
    base_url: String,
    model: String,
    image_model: String,
    image_size: String,
    timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UpstreamConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::default()
            .with_api_key(api_key)
            .with_base_url(base_url)
            .with_model(model)
    }

    pub fn from_env() -> Self {
        let mut config = Self::default()
            .with_api_key(env_or_empty("LLM_API_KEY"))
            .with_base_url(env_or_empty("LLM_BASE_URL"))
            .with_model(env_or_empty("LLM_MODEL"));

        let image_model = env_or_empty("LLM_IMAGE_MODEL");
        if !image_model.is_empty() {
            config = config.with_image_model(image_model);
        }

        let image_size = env_or_empty("LLM_IMAGE_SIZE");
        if !image_size.is_empty() {
            config = config.with_image_size(image_size);
        }

        match env_or_empty("LLM_TIMEOUT_SECS").parse::<u64>() {
            Ok(secs) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
            _ => config,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into().trim().to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into().trim().to_string();
        self
    }

    pub fn with_image_model(mut self, image_model: impl Into<String>) -> Self {
        self.image_model = image_model.into();
        self
    }

    pub fn with_image_size(mut self, image_size: impl Into<String>) -> Self {
        self.image_size = image_size.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn image_size(&self) -> &str {
        &self.image_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Names of the required settings that are still empty.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = self.missing_connection_settings();
        if self.model.is_empty() {
            missing.push("LLM_MODEL");
        }
        missing
    }

    /// Missing settings needed to reach the upstream at all, ignoring the model.
    pub fn missing_connection_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("LLM_API_KEY");
        }
        if self.base_url.is_empty() {
            missing.push("LLM_BASE_URL");
        }
        missing
    }

    pub fn is_configured(&self) -> bool {
        self.missing_settings().is_empty()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_settings() {
        let config = UpstreamConfig::default().with_model("m");
        assert_eq!(config.missing_settings(), vec!["LLM_API_KEY", "LLM_BASE_URL"]);
        assert!(!config.is_configured());
    }

    #[test]
    fn connection_settings_ignore_model() {
        let config = UpstreamConfig::new("k", "http://localhost:9000", "");
        assert!(config.missing_connection_settings().is_empty());
        assert_eq!(config.missing_settings(), vec!["LLM_MODEL"]);

        let config = UpstreamConfig::default();
        assert_eq!(
            config.missing_connection_settings(),
            vec!["LLM_API_KEY", "LLM_BASE_URL"]
        );
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = UpstreamConfig::new("k", "http://localhost:9000/api/v3/", "m");
        assert!(config.is_configured());
        assert_eq!(
            config.endpoint("/chat/completions"),
            "http://localhost:9000/api/v3/chat/completions"
        );
    }
}
