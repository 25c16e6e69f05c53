mod chat_turn;
mod completion;
mod message;
mod role_mode;

pub use chat_turn::*;
pub use completion::*;
pub use message::*;
pub use role_mode::*;
