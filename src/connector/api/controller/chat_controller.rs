use std::io::Write;

use anyhow::Result;
use futures_util::StreamExt;

use crate::application::CompletionService;
use crate::domain::{assemble, ChatTurnRequest, ChatTurnResult, CompletionOptions, RoleMode};

use super::super::Container;

/// Per-invocation overrides for the one-shot `chat` command.
#[derive(Debug, Clone, Default)]
pub struct ChatOverrides {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub deep_reasoning: bool,
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(
        &self,
        message: String,
        role: Option<String>,
        stream: bool,
        overrides: ChatOverrides,
    ) -> Result<String> {
        let role_mode = RoleMode::resolve(role.as_deref());
        let options = self.options(&overrides);

        if stream {
            return self.stream(&message, role_mode, &options).await;
        }

        let request = ChatTurnRequest::new(message).with_role_mode(role_mode);
        let use_case = self.container.chat_turn_use_case_with(options);
        let result = use_case.execute(&request).await;

        Ok(self.format_result(&result))
    }

    /// Print the reply as it arrives; image generation is not part of the streamed path.
    async fn stream(
        &self,
        message: &str,
        role_mode: RoleMode,
        options: &CompletionOptions,
    ) -> Result<String> {
        let messages = assemble(role_mode, &[], message);
        let mut deltas = self
            .container
            .completion_service()
            .stream(&messages, options)
            .await?;

        let mut stdout = std::io::stdout();
        while let Some(delta) = deltas.next().await {
            write!(stdout, "{}", delta?)?;
            stdout.flush()?;
        }
        writeln!(stdout)?;

        Ok(String::new())
    }

    fn options(&self, overrides: &ChatOverrides) -> CompletionOptions {
        let mut options = self.container.completion_options();
        if let Some(temperature) = overrides.temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(max_tokens) = overrides.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        if overrides.deep_reasoning {
            options = options.with_deep_reasoning(true);
        }
        options
    }

    fn format_result(&self, result: &ChatTurnResult) -> String {
        let mut output = result.reply_text().to_string();

        if result.has_images() {
            output.push_str(&format!("\n\nImages ({}):\n", result.images().len()));
            for (i, url) in result.images().iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, url));
            }
        }

        output
    }
}
