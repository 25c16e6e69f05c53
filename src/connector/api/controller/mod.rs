pub mod chat_controller;
pub mod health_controller;

pub use chat_controller::{ChatController, ChatOverrides};
pub use health_controller::HealthController;
