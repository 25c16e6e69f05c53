use async_trait::async_trait;
use serde_json::json;

use crate::application::CompletionService;
use crate::domain::{Completion, CompletionOptions, ConversationMessage, DomainError, Role};

/// Offline completion service that echoes the latest user message.
pub struct MockCompletion;

impl MockCompletion {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        _options: &CompletionOptions,
    ) -> Result<Completion, DomainError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content().text())
            .unwrap_or_default();

        let text = format!("[mock] You said: {last_user}");
        let raw = json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }],
            "model": self.model_name(),
        });
        Ok(Completion::new(text, raw))
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
