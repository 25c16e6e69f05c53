mod http_completion_client;
mod http_image_client;
mod mock_completion;
mod mock_image_generator;
mod sse_decoder;
mod upstream_config;

pub use http_completion_client::*;
pub use http_image_client::*;
pub use mock_completion::*;
pub use mock_image_generator::*;
pub use sse_decoder::*;
pub use upstream_config::*;
