//! Chat service pieces: request types, prompt templates and the
//! OpenAI chat-completion provider (blocking completion and token streaming).

pub mod config;
pub mod prompts;
pub mod providers;
pub mod types;

pub use config::LLMConfig;
pub use providers::{ByteStream, ChatModel, OpenAiChat};
pub use types::*;
