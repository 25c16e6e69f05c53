//! # Domain Layer
//!
//! Conversation models, the food-intent classifier and the pure prompt
//! builders. Nothing here performs I/O.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
