use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;

use crate::domain::{Completion, CompletionOptions, ConversationMessage, DomainError};

/// Incremental reply text, one delta per item.
pub type TextStream = BoxStream<'static, Result<String, DomainError>>;

/// Sends a conversation to a text-completion model.
///
/// Implementors own transport and vendor-specific wire details so the
/// orchestration stays provider-agnostic and can run against fakes.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete the conversation and return the first choice's text.
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<Completion, DomainError>;

    /// Stream the reply as text deltas.
    ///
    /// The default emits the whole completion as a single chunk.
    async fn stream(
        &self,
        messages: &[ConversationMessage],
        options: &CompletionOptions,
    ) -> Result<TextStream, DomainError> {
        let completion = self.complete(messages, options).await?;
        Ok(stream::once(async move { Ok(completion.into_text()) }).boxed())
    }

    fn model_name(&self) -> &str;
}
