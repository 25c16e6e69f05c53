use anyhow::Result;

use crate::connector::api::ServiceHealth;

use super::super::Container;

pub struct HealthController<'a> {
    container: &'a Container,
}

impl<'a> HealthController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn health(&self) -> Result<String> {
        Ok(self.format_health(&self.container.health()))
    }

    fn format_health(&self, health: &ServiceHealth) -> String {
        let api = if health.api.is_empty() {
            "(not set)"
        } else {
            health.api.as_str()
        };
        let model = if health.api_model.is_empty() {
            "(not set)"
        } else {
            health.api_model.as_str()
        };

        format!(
            "DishTalk Health\n===============\nService:        {}\nStatus:         {}\nAPI:            {}\nAPI configured: {}\nModel:          {}\nChecked at:     {}",
            health.service,
            health.status,
            api,
            if health.api_configured { "yes" } else { "no" },
            model,
            health.timestamp
        )
    }
}
