use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ConversationMessage, RoleMode};
use crate::domain::DomainError;

/// One incoming chat message together with the history the client retained.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnRequest {
    user_message: String,
    history: Vec<ConversationMessage>,
    role_mode: RoleMode,
}

impl ChatTurnRequest {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            history: Vec::new(),
            role_mode: RoleMode::default(),
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_role_mode(mut self, role_mode: RoleMode) -> Self {
        self.role_mode = role_mode;
        self
    }

    /// Validate an inbound JSON body of the form
    /// `{ message, conversationHistory?, role? }`.
    ///
    /// `message` must be a non-blank string. `conversationHistory` may be
    /// absent or null; otherwise every entry must be a well-formed message.
    /// An unknown or non-string `role` falls back to the default persona.
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let Some(object) = body.as_object() else {
            return Err(DomainError::invalid_input("Request body must be a JSON object"));
        };

        let user_message = match object.get("message") {
            None | Some(Value::Null) => {
                return Err(DomainError::invalid_input("Message is required"));
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Err(DomainError::invalid_input("Message must not be empty"));
            }
            Some(Value::String(text)) => text.clone(),
            Some(_) => return Err(DomainError::invalid_input("Message must be a string")),
        };

        let history = match object.get("conversationHistory") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value::<ConversationMessage>(item.clone()).map_err(|e| {
                        DomainError::invalid_input(format!(
                            "conversationHistory[{i}] is malformed: {e}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(DomainError::invalid_input(
                    "conversationHistory must be an array",
                ));
            }
        };

        let role_mode = RoleMode::resolve(object.get("role").and_then(Value::as_str));

        Ok(Self {
            user_message,
            history,
            role_mode,
        })
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    pub fn role_mode(&self) -> RoleMode {
        self.role_mode
    }
}

/// URLs returned by one image-generation call, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationOutcome {
    urls: Vec<String>,
}

impl ImageGenerationOutcome {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurnResult {
    reply_text: String,
    images: Vec<String>,
}

impl ChatTurnResult {
    pub fn new(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
            images: Vec::new(),
        }
    }

    /// Attach generated images; an empty outcome leaves the result untouched.
    pub fn with_images(mut self, outcome: ImageGenerationOutcome) -> Self {
        if !outcome.is_empty() {
            self.images = outcome.into_urls();
        }
        self
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use serde_json::json;

    #[test]
    fn parses_full_body() {
        let body = json!({
            "message": "I want noodles",
            "conversationHistory": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello!"}
            ],
            "role": "nutritionist"
        });

        let request = ChatTurnRequest::from_json(&body).unwrap();
        assert_eq!(request.user_message(), "I want noodles");
        assert_eq!(request.history().len(), 2);
        assert_eq!(request.history()[1].role(), Role::Assistant);
        assert_eq!(request.role_mode(), RoleMode::Nutritionist);
    }

    #[test]
    fn missing_message_is_invalid() {
        let err = ChatTurnRequest::from_json(&json!({"role": "nutritionist"})).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn non_string_message_is_invalid() {
        let err = ChatTurnRequest::from_json(&json!({"message": 42})).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn blank_message_is_invalid() {
        let err = ChatTurnRequest::from_json(&json!({"message": "   "})).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn history_must_be_an_array() {
        let body = json!({"message": "hi", "conversationHistory": "nope"});
        assert!(ChatTurnRequest::from_json(&body).unwrap_err().is_invalid_input());
    }

    #[test]
    fn malformed_history_entry_is_invalid() {
        let body = json!({
            "message": "hi",
            "conversationHistory": [{"role": "user"}]
        });
        let err = ChatTurnRequest::from_json(&body).unwrap_err();
        assert!(err.to_string().contains("conversationHistory[0]"));
    }

    #[test]
    fn null_history_and_unknown_role_fall_back() {
        let body = json!({"message": "hi", "conversationHistory": null, "role": 7});
        let request = ChatTurnRequest::from_json(&body).unwrap();
        assert!(request.history().is_empty());
        assert_eq!(request.role_mode(), RoleMode::SupportiveFriend);
    }

    #[test]
    fn empty_outcome_is_not_merged() {
        let result = ChatTurnResult::new("ok").with_images(ImageGenerationOutcome::default());
        assert!(!result.has_images());

        let result = ChatTurnResult::new("ok")
            .with_images(ImageGenerationOutcome::new(vec!["https://img/1".into()]));
        assert_eq!(result.images(), ["https://img/1".to_string()]);
    }
}
