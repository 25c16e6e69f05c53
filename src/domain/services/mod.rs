//! Domain services: the food-intent classifier and the pure message / prompt builders.

mod chat_assembler;
mod food_intent;
mod image_prompt;

pub use chat_assembler::*;
pub use food_intent::*;
pub use image_prompt::*;
