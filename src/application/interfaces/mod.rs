mod completion_service;
mod image_generator;

pub use completion_service::*;
pub use image_generator::*;
