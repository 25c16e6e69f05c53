use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Sampling knobs forwarded to the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    temperature: f32,
    max_tokens: u32,
    deep_reasoning: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            deep_reasoning: false,
        }
    }
}

impl CompletionOptions {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    pub fn with_deep_reasoning(mut self, enabled: bool) -> Self {
        self.deep_reasoning = enabled;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn deep_reasoning(&self) -> bool {
        self.deep_reasoning
    }
}

/// Normalized completion: the reply text plus the decoded upstream body.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    text: String,
    raw: Value,
}

impl Completion {
    pub fn new(text: impl Into<String>, raw: Value) -> Self {
        Self {
            text: text.into(),
            raw,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_clamped() {
        let options = CompletionOptions::default()
            .with_temperature(5.0)
            .with_max_tokens(0);
        assert_eq!(options.temperature(), 2.0);
        assert_eq!(options.max_tokens(), 1);
    }
}
