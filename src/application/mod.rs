//! # Application Layer
//!
//! Upstream service interfaces and the chat-turn orchestration that drives them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
