pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    ChatTurnUseCase, CompletionService, ImageGenerator, TextStream, APOLOGY_REPLY,
};

pub use connector::{
    decode_text_deltas, Container, ContainerConfig, HttpCompletionClient, HttpImageClient,
    MockCompletion, MockImageGenerator, ServiceHealth, UpstreamConfig,
};

pub use domain::{
    assemble, build_image_prompt, ChatTurnRequest, ChatTurnResult, Completion,
    CompletionOptions, ConversationMessage, DomainError, FoodIntentClassifier,
    ImageGenerationOutcome, MessageContent, Role, RoleMode,
};
