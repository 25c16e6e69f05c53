use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, ChatOverrides, HealthController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    health_controller: HealthController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            health_controller: HealthController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat {
                message,
                role,
                stream,
                temperature,
                max_tokens,
                deep_reasoning,
            } => {
                let overrides = ChatOverrides {
                    temperature,
                    max_tokens,
                    deep_reasoning,
                };
                self.chat_controller
                    .chat(message, role, stream, overrides)
                    .await
            }
            Commands::Health => self.health_controller.health().await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
